
//! Inspect packed texture buffers.
//!
//! One contiguous buffer holds every mip level and array layer of a
//! texture. This crate computes all byte offsets inside such a buffer,
//! decides how each raw pixel format can be displayed, converts the
//! formats that need it into canonical 8-bit layouts, and computes
//! per-channel minimum/maximum statistics.
//!
//! File decoding and encoding, windowing and rasterization are out of
//! scope; see [`codec`] for the traits external libraries plug into.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod math;
pub mod meta;
pub mod texture;
pub mod display;
pub mod analyze;
pub mod codec;

#[cfg(feature = "rayon")]
pub mod background;


/// Export the most commonly used names into one flat namespace.
pub mod prelude {

    // main exports
    pub use crate::texture::Texture;
    pub use crate::meta::TextureLayout;
    pub use crate::display::{DisplaySource, DisplayFrame, FloatVisualization};
    pub use crate::analyze::{MinMaxReport, analyze};

    // secondary data types
    pub use crate::math::Dimensions;
    pub use crate::meta::format::{
        PixelFormat, ChannelType, ColorSpace, TextureType, FileFormat,
    };
    pub use crate::display::DisplayFormat;
    pub use crate::analyze::{ChannelRange, ChannelValue};
    pub use crate::error::{Error, Result};

    // re-export external stuff
    pub use half::f16;
}
