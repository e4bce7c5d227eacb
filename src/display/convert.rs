
//! Rewrite raw texel buffers into one of the canonical display formats.
//!
//! Conversions are registered per `(PixelFormat, ChannelType)` pair.
//! A pair without a registered conversion fails with
//! [`Error::UnsupportedFormat`] carrying the pair — never a silent no-op.

use crate::error::{Error, Result, u64_to_usize};
use crate::meta::TextureLayout;
use crate::meta::format::{ChannelType, PixelFormat};
use crate::texture::Texture;
use super::DisplayFormat;
use super::remap::{FloatVisualization, FloatWidth, remap_to_bytes};


/// A registered way of rewriting one raw format pair
/// into a canonical display format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Conversion {

    /// Copy three bytes per pixel and append a constant opaque alpha byte.
    AppendOpaqueAlpha,

    /// Copy the bytes unchanged. Registered so that every displayable
    /// format pair takes the same code path.
    Identity,

    /// Keep the leading channel byte of each pixel, drop the alpha byte.
    DropAlpha,

    /// Remap float channels into bytes. Covers the base mip level only.
    FloatToBytes(FloatWidth),
}

/// Look up the conversion and its output format for a format pair.
///
/// `None` means no path is registered; callers turn this into an
/// [`Error::UnsupportedFormat`] instead of skipping the pixel data.
pub fn conversion_for(pixel_format: PixelFormat, channel_type: ChannelType)
    -> Option<(Conversion, DisplayFormat)>
{
    use ChannelType::*;
    use PixelFormat::*;

    match (pixel_format, channel_type) {
        (Rgb8, UnsignedNormalized) => Some((Conversion::AppendOpaqueAlpha, DisplayFormat::Rgba8)),
        (Rgba8, UnsignedNormalized) => Some((Conversion::Identity, DisplayFormat::Rgba8)),
        (Ra8, UnsignedNormalized) => Some((Conversion::DropAlpha, DisplayFormat::Grayscale8)),

        (R32, SignedFloat | UnsignedFloat) => Some((Conversion::FloatToBytes(FloatWidth::F32), DisplayFormat::Grayscale8)),
        (Rgb32, SignedFloat | UnsignedFloat) => Some((Conversion::FloatToBytes(FloatWidth::F32), DisplayFormat::Rgb8)),
        (Rgba32, SignedFloat | UnsignedFloat) => Some((Conversion::FloatToBytes(FloatWidth::F32), DisplayFormat::Rgba8)),

        (R16, SignedFloat | UnsignedFloat) => Some((Conversion::FloatToBytes(FloatWidth::F16), DisplayFormat::Grayscale8)),
        (Rgb16, SignedFloat | UnsignedFloat) => Some((Conversion::FloatToBytes(FloatWidth::F16), DisplayFormat::Rgb8)),
        (Rgba16, SignedFloat | UnsignedFloat) => Some((Conversion::FloatToBytes(FloatWidth::F16), DisplayFormat::Rgba8)),

        _ => None,
    }
}


/// A whole texture rewritten into a canonical display format,
/// packed and addressed with the same offset math as the source,
/// using the destination format's bytes per pixel.
///
/// Float conversions keep only the base mip level; its layout
/// then reports a mip count of one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConvertedChain {
    format: DisplayFormat,
    texture: Texture,
}

impl ConvertedChain {

    /// The canonical format of the converted bytes.
    pub fn format(&self) -> DisplayFormat {
        self.format
    }

    /// The layout the converted buffer is packed with.
    pub fn layout(&self) -> &TextureLayout {
        self.texture.layout()
    }

    /// One converted layer of one mip level.
    pub fn layer_span(&self, mip_index: u32, layer_index: u32) -> Result<&[u8]> {
        self.texture.layer_span(mip_index, layer_index)
    }
}


/// Convert a texture into a canonical display buffer.
///
/// Integer conversions rewrite the full mip chain and every layer;
/// float conversions remap the base mip level only, honoring the
/// selected visualization mode.
pub fn convert(texture: &Texture, visualization: FloatVisualization) -> Result<ConvertedChain> {
    let layout = *texture.layout();

    let (conversion, format) = conversion_for(layout.pixel_format, layout.channel_type)
        .ok_or_else(|| Error::unsupported(layout.pixel_format, layout.channel_type))?;

    match conversion {
        Conversion::Identity => {
            let converted = TextureLayout { pixel_format: format.to_pixel_format(), ..layout };
            Ok(ConvertedChain { format, texture: Texture::new(converted, texture.bytes().to_vec())? })
        }

        Conversion::AppendOpaqueAlpha => convert_chain(texture, format, 3, 4, |src, dst| {
            dst[..3].copy_from_slice(src);
            dst[3] = u8::MAX;
        }),

        Conversion::DropAlpha => convert_chain(texture, format, 2, 1, |src, dst| {
            dst[0] = src[0];
        }),

        Conversion::FloatToBytes(width) => convert_float_base_mip(texture, format, width, visualization),
    }
}

// walk the chain mip by mip and layer by layer, with source and
// destination offsets each computed from their own layout
fn convert_chain(
    texture: &Texture,
    format: DisplayFormat,
    src_bytes_per_pixel: usize,
    dst_bytes_per_pixel: usize,
    convert_pixel: impl Fn(&[u8], &mut [u8]),
) -> Result<ConvertedChain>
{
    let src_layout = *texture.layout();
    let dst_layout = TextureLayout { pixel_format: format.to_pixel_format(), ..src_layout };

    let mut buffer = vec![0_u8; u64_to_usize(dst_layout.total_size()?, "converted buffer size")?];
    let dst_offsets = dst_layout.mip_offsets()?;

    for mip_index in 0..src_layout.mip_count {
        let dst_layer_bytes = dst_layout.bytes_per_layer(mip_index)?;

        for layer_index in 0..src_layout.layer_count {
            let src = texture.layer_span(mip_index, layer_index)?;

            let start = u64_to_usize(
                dst_offsets[mip_index as usize] + layer_index as u64 * dst_layer_bytes,
                "converted layer offset",
            )?;
            let dst = &mut buffer[start .. start + u64_to_usize(dst_layer_bytes, "converted layer size")?];

            for (src_pixel, dst_pixel) in src.chunks_exact(src_bytes_per_pixel).zip(dst.chunks_exact_mut(dst_bytes_per_pixel)) {
                convert_pixel(src_pixel, dst_pixel);
            }
        }
    }

    Ok(ConvertedChain { format, texture: Texture::new(dst_layout, buffer)? })
}

fn convert_float_base_mip(
    texture: &Texture,
    format: DisplayFormat,
    width: FloatWidth,
    visualization: FloatVisualization,
) -> Result<ConvertedChain>
{
    let src_layout = *texture.layout();
    let dst_layout = TextureLayout {
        pixel_format: format.to_pixel_format(),
        mip_count: 1,
        ..src_layout
    };

    // all layers of the base level share one observed range
    let src = texture.mip_span(0)?;
    let mut buffer = vec![0_u8; u64_to_usize(dst_layout.total_size()?, "converted buffer size")?];

    remap_to_bytes(src, width, format.channel_count() as usize, visualization, &mut buffer)?;

    Ok(ConvertedChain { format, texture: Texture::new(dst_layout, buffer)? })
}
