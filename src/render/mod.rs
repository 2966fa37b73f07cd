//! Chart rendering
//!
//! Every renderer draws through the [`surface::Surface`] trait; the
//! [`raster::RasterSurface`] backend keeps them testable without a window.

pub mod bars;
pub mod chart;
pub mod donut;
pub mod duration;
mod font;
pub mod line;
pub mod peak_hours;
pub mod raster;
pub mod surface;
pub mod worldmap;
pub mod years;
