
//! The enumerations that describe how texel bytes are laid out
//! and how their numbers are meant to be interpreted.

use std::fmt;


/// The memory layout of a single texel.
///
/// The names state the stored channel order and the bit width of
/// each channel. The `Bc` variants are block-compressed layouts;
/// this crate treats them as opaque and never decodes their blocks.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PixelFormat {

    /// One 8-bit channel.
    R8,

    /// Two 8-bit channels, red and green.
    Rg8,

    /// Two 8-bit channels, red and alpha.
    Ra8,

    /// Three 8-bit channels, red first.
    Rgb8,

    /// Three 8-bit channels, blue first.
    Bgr8,

    /// Four 8-bit channels, red first, alpha last.
    Rgba8,

    /// Four 8-bit channels, blue first, alpha last.
    Bgra8,

    /// One 16-bit channel.
    R16,

    /// Two 16-bit channels, red and green.
    Rg16,

    /// Two 16-bit channels, red and alpha.
    Ra16,

    /// Three 16-bit channels, red first.
    Rgb16,

    /// Three 16-bit channels, blue first.
    Bgr16,

    /// Four 16-bit channels, red first, alpha last.
    Rgba16,

    /// Four 16-bit channels, blue first, alpha last.
    Bgra16,

    /// One 32-bit channel.
    R32,

    /// Two 32-bit channels, red and green.
    Rg32,

    /// Two 32-bit channels, red and alpha.
    Ra32,

    /// Three 32-bit channels, red first.
    Rgb32,

    /// Three 32-bit channels, blue first.
    Bgr32,

    /// Four 32-bit channels, red first, alpha last.
    Rgba32,

    /// Four 32-bit channels, blue first, alpha last.
    Bgra32,

    /// Block-compressed, three channels.
    Bc1Rgb,

    /// Block-compressed, four channels with one-bit alpha.
    Bc1Rgba,

    /// Block-compressed, four channels with explicit alpha.
    Bc2Rgba,

    /// Block-compressed, four channels with interpolated alpha.
    Bc3Rgba,

    /// Block-compressed, one channel.
    Bc4,

    /// Block-compressed, two channels.
    Bc5,

    /// Block-compressed, three float channels.
    Bc6h,

    /// Block-compressed, four channels.
    Bc7Rgba,
}

impl PixelFormat {

    /// Number of channels a texel of this format has.
    pub fn channel_count(self) -> u32 {
        use PixelFormat::*;
        match self {
            R8 | R16 | R32 | Bc4 => 1,
            Rg8 | Ra8 | Rg16 | Ra16 | Rg32 | Ra32 | Bc5 => 2,
            Rgb8 | Bgr8 | Rgb16 | Bgr16 | Rgb32 | Bgr32 | Bc1Rgb | Bc6h => 3,
            Rgba8 | Bgra8 | Rgba16 | Bgra16 | Rgba32 | Bgra32
                | Bc1Rgba | Bc2Rgba | Bc3Rgba | Bc7Rgba => 4,
        }
    }

    /// Number of bytes one channel of one texel occupies.
    /// `None` for block-compressed formats, which have
    /// no per-texel byte layout.
    pub fn bytes_per_channel(self) -> Option<u64> {
        use PixelFormat::*;
        match self {
            R8 | Rg8 | Ra8 | Rgb8 | Bgr8 | Rgba8 | Bgra8 => Some(1),
            R16 | Rg16 | Ra16 | Rgb16 | Bgr16 | Rgba16 | Bgra16 => Some(2),
            R32 | Rg32 | Ra32 | Rgb32 | Bgr32 | Rgba32 | Bgra32 => Some(4),

            Bc1Rgb | Bc1Rgba | Bc2Rgba | Bc3Rgba
                | Bc4 | Bc5 | Bc6h | Bc7Rgba => None,
        }
    }

    /// Number of bytes one texel occupies in a tightly packed buffer.
    /// `None` for block-compressed formats.
    pub fn bytes_per_pixel(self) -> Option<u64> {
        self.bytes_per_channel()
            .map(|bytes| bytes * self.channel_count() as u64)
    }

    /// Whether this is one of the opaque block-compressed layouts.
    pub fn is_compressed(self) -> bool {
        self.bytes_per_channel().is_none()
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PixelFormat::*;
        formatter.write_str(match self {
            R8 => "R_8", Rg8 => "RG_8", Ra8 => "RA_8",
            Rgb8 => "RGB_8", Bgr8 => "BGR_8",
            Rgba8 => "RGBA_8", Bgra8 => "BGRA_8",

            R16 => "R_16", Rg16 => "RG_16", Ra16 => "RA_16",
            Rgb16 => "RGB_16", Bgr16 => "BGR_16",
            Rgba16 => "RGBA_16", Bgra16 => "BGRA_16",

            R32 => "R_32", Rg32 => "RG_32", Ra32 => "RA_32",
            Rgb32 => "RGB_32", Bgr32 => "BGR_32",
            Rgba32 => "RGBA_32", Bgra32 => "BGRA_32",

            Bc1Rgb => "BC1_RGB", Bc1Rgba => "BC1_RGBA",
            Bc2Rgba => "BC2_RGBA", Bc3Rgba => "BC3_RGBA",
            Bc4 => "BC4", Bc5 => "BC5",
            Bc6h => "BC6H", Bc7Rgba => "BC7_RGBA",
        })
    }
}


/// How the raw integer or float stored in a channel
/// translates into a numeric value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ChannelType {

    /// Integer storage read as `[0, 1]` by dividing
    /// by the largest representable integer.
    UnsignedNormalized,

    /// Plain unsigned integer values.
    UnsignedInteger,

    /// Unsigned integer storage read as the float of the same value.
    UnsignedScaled,

    /// Integer storage read as `[-1, 1]`.
    SignedNormalized,

    /// Plain signed integer values.
    SignedInteger,

    /// Signed integer storage read as the float of the same value.
    SignedScaled,

    /// Float storage without a sign bit.
    UnsignedFloat,

    /// IEEE float storage.
    SignedFloat,

    /// Unsigned normalized storage with the sRGB transfer function applied.
    Srgb,
}

impl fmt::Display for ChannelType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ChannelType::*;
        formatter.write_str(match self {
            UnsignedNormalized => "Unsigned Normalized",
            UnsignedInteger => "Unsigned Integer",
            UnsignedScaled => "Unsigned Scaled",
            SignedNormalized => "Signed Normalized",
            SignedInteger => "Signed Integer",
            SignedScaled => "Signed Scaled",
            UnsignedFloat => "Unsigned Float",
            SignedFloat => "Signed Float",
            Srgb => "sRGB",
        })
    }
}


/// The transfer function the stored values are encoded with.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ColorSpace {

    /// Values are proportional to light intensity.
    Linear,

    /// Values are encoded with the sRGB transfer function.
    Srgb,
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            ColorSpace::Linear => "Linear",
            ColorSpace::Srgb => "sRGB",
        })
    }
}


/// The shape of a texture. Purely informational for this crate;
/// all shapes share the same packed buffer layout.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TextureType {

    /// A single row of texels.
    Single1D,

    /// A single flat image.
    Single2D,

    /// A single volume.
    Single3D,

    /// Six flat faces sharing one format and extent.
    Cubemap,

    /// Multiple independent rows.
    Array1D,

    /// Multiple independent flat images.
    Array2D,

    /// Multiple independent volumes.
    Array3D,

    /// Multiple cubemaps.
    ArrayCubemap,
}

impl fmt::Display for TextureType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TextureType::*;
        formatter.write_str(match self {
            Single1D => "1D",
            Single2D => "2D",
            Single3D => "3D",
            Cubemap => "Cubemap",
            Array1D => "1D Array",
            Array2D => "2D Array",
            Array3D => "3D Array",
            ArrayCubemap => "Cubemap Array",
        })
    }
}


/// The file format a texture was decoded from. Purely informational;
/// all file handling lives in the external codec libraries.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FileFormat {

    /// A Khronos texture container.
    Ktx,

    /// A portable network graphics image.
    Png,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            FileFormat::Ktx => "KTX",
            FileFormat::Png => "PNG",
        })
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bytes_per_pixel_table() {
        assert_eq!(PixelFormat::R8.bytes_per_pixel(), Some(1));
        assert_eq!(PixelFormat::Ra8.bytes_per_pixel(), Some(2));
        assert_eq!(PixelFormat::Rgb8.bytes_per_pixel(), Some(3));
        assert_eq!(PixelFormat::Rgba8.bytes_per_pixel(), Some(4));
        assert_eq!(PixelFormat::Rgb16.bytes_per_pixel(), Some(6));
        assert_eq!(PixelFormat::Bgr32.bytes_per_pixel(), Some(12));
        assert_eq!(PixelFormat::Rgba32.bytes_per_pixel(), Some(16));

        assert_eq!(PixelFormat::Bc1Rgb.bytes_per_pixel(), None);
        assert_eq!(PixelFormat::Bc7Rgba.bytes_per_pixel(), None);
    }

    #[test]
    fn compressed_formats_are_opaque() {
        assert!(PixelFormat::Bc6h.is_compressed());
        assert!(!PixelFormat::Bgra16.is_compressed());

        // channel counts remain known even where the byte layout is opaque
        assert_eq!(PixelFormat::Bc4.channel_count(), 1);
        assert_eq!(PixelFormat::Bc5.channel_count(), 2);
        assert_eq!(PixelFormat::Bc6h.channel_count(), 3);
        assert_eq!(PixelFormat::Bc1Rgba.channel_count(), 4);
    }
}
