//! Aggregation and normalization logic

pub mod countries;
pub mod genres;
pub mod library;
pub mod resample;
pub mod timeline;
