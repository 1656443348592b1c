//! # rasterlab
//!
//! An educational 2D graphics and image-processing workbench: the engine
//! behind a vector/raster editor, without the editor.
//!
//! Two independent halves share one crate:
//!
//! - **Vector side** — scanline rasterizers (Bresenham lines, midpoint
//!   circles, De Casteljau Bézier curves) turn shapes into pixel
//!   coordinate lists for an external drawing surface, and a 3x3
//!   homogeneous [`Mat3`] engine transforms polygon point sets.
//! - **Raster side** — pure pipeline stages over an RGB [`PixelBuffer`]:
//!   per-pixel point operations, kernel convolution and rank filters,
//!   luminance histogram analysis with four binarization strategies, and
//!   binary morphology over signed structuring elements.
//!
//! Everything is synchronous and allocation-straightforward; the heavier
//! per-pixel loops parallelize across rows with rayon. Windowing, undo
//! history, scene files, and image containers are collaborator concerns
//! and stay outside the crate.
//!
//! ```
//! use rasterlab::{ops, PixelBuffer};
//!
//! let buf = PixelBuffer::from_raw(2, 1, vec![[100, 100, 100], [200, 200, 200]])?;
//! let binary = ops::histogram::threshold_manual(&buf, 150);
//! assert_eq!(binary.pixels(), &[[0, 0, 0], [255, 255, 255]]);
//! # Ok::<(), rasterlab::Error>(())
//! ```

pub mod buffer;
pub mod color;
pub mod error;
pub mod ops;
pub mod parse;
pub mod raster;
pub mod shape;
pub mod transform;

pub use buffer::PixelBuffer;
pub use error::{Error, Result};
pub use ops::convolve::Kernel;
pub use ops::morphology::{BinaryImage, StructuringElement};
pub use raster::{evaluate_bezier, rasterize_circle, rasterize_line};
pub use shape::Shape;
pub use transform::Mat3;
