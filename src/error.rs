
//! Error type for everything in this crate.

use std::borrow::Cow;
use std::convert::TryFrom;
use std::fmt;

use crate::meta::format::{ChannelType, PixelFormat};

/// A result that, if successful, contains `T`.
pub type Result<T> = std::result::Result<T, Error>;

/// A result that, if successful, contains nothing.
pub type UnitResult = Result<()>;

/// An error of any kind that this crate produces.
/// None of these conditions ever manifest as a panic
/// or an out-of-bounds read.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {

    /// A computation was cancelled through its progress callback.
    Aborted,

    /// The pixel format and channel type pair has no registered
    /// display, conversion or analysis path.
    UnsupportedFormat {

        /// The raw texel layout of the rejected texture.
        pixel_format: PixelFormat,

        /// The numeric interpretation of the rejected texture.
        channel_type: ChannelType,
    },

    /// A mip level or array layer index beyond the counts of the layout.
    IndexOutOfRange {

        /// Which kind of index was rejected, for example "mip level".
        what: &'static str,

        /// The rejected index.
        index: u32,

        /// The number of valid indices.
        count: u32,
    },

    /// A computed byte range does not fit into the packed buffer.
    /// Always a bug in the layout that produced the range,
    /// caught before any read happens.
    LayoutOverflow {

        /// Begin of the requested range.
        offset: u64,

        /// Length of the requested range.
        length: u64,

        /// Size of the buffer the range must fit into.
        buffer_size: u64,
    },

    /// The contents of a layout are contradicting or insufficient.
    Invalid(Cow<'static, str>),
}

impl Error {

    /// Create an error that describes a contradicting or insufficient layout.
    pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Error::Invalid(message.into())
    }

    /// Create an error carrying the format pair that no registered path exists for.
    pub(crate) fn unsupported(pixel_format: PixelFormat, channel_type: ChannelType) -> Self {
        Error::UnsupportedFormat { pixel_format, channel_type }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Aborted =>
                write!(formatter, "cancelled by the caller"),

            Error::UnsupportedFormat { pixel_format, channel_type } =>
                write!(formatter, "no registered path for {} textures with {} channels", pixel_format, channel_type),

            Error::IndexOutOfRange { what, index, count } =>
                write!(formatter, "{} index {} is out of range, only {} exist", what, index, count),

            Error::LayoutOverflow { offset, length, buffer_size } =>
                write!(formatter, "byte range at {} with length {} exceeds the buffer of {} bytes", offset, length, buffer_size),

            Error::Invalid(message) =>
                write!(formatter, "invalid texture layout: {}", message),
        }
    }
}

impl std::error::Error for Error {}

/// Convert a byte count to `usize`, failing on machines
/// where the value exceeds the address space.
pub(crate) fn u64_to_usize(value: u64, error_message: &'static str) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::invalid(error_message))
}
