//! Raster-image pipeline operations. Every operation consumes one
//! [`PixelBuffer`](crate::buffer::PixelBuffer) and produces a new one;
//! callers chain stages in whatever order they need.

pub mod convolve;
pub mod histogram;
pub mod morphology;
pub mod point;
