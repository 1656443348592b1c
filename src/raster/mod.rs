//! Scanline rasterization: continuous vector primitives to discrete pixel
//! coordinate sequences. The caller (an external drawing surface) is
//! responsible for actually plotting the points.

mod bezier;
mod circle;
mod line;

pub use bezier::evaluate_bezier;
pub use circle::rasterize_circle;
pub use line::rasterize_line;
