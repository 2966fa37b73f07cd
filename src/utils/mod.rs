//! Utility modules for reflectiv

pub mod csv;
pub mod dates;
pub mod parsers;
