//! Raster containers and helpers.
//!
//! - [`ImageF32`]: owned single-channel float raster used by every numeric stage.
//! - [`ImageRgbU8`]: borrowed interleaved 8-bit RGB view handed in by callers.
//! - [`io`]: loading/saving through the `image` crate and JSON output.
//! - [`resize`]: bilinear resampling and max-dimension downscaling.
pub mod f32;
pub mod io;
pub mod resize;
pub mod rgb;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::resize::{rescale_to_max_dim, resize_bilinear, resize_by};
pub use self::rgb::ImageRgbU8;
pub use self::traits::{ImageView, ImageViewMut, Rows};
