
//! Decide how a raw texture can be shown, and assemble the
//! displayable bytes for any mip level and array layer.
//!
//! [`DisplaySource`] is the facade the presentation layer talks to:
//! it classifies the texture's format once, converts the buffer
//! eagerly where needed, and then serves [`DisplayFrame`]s for every
//! user interaction without retaining any other hidden state.

pub mod convert;
pub mod remap;

use crate::error::{Error, Result, UnitResult};
use crate::math::Dimensions;
use crate::meta::format::{ChannelType, PixelFormat};
use crate::texture::Texture;
use self::convert::{Conversion, ConvertedChain, conversion_for, convert};

pub use self::remap::FloatVisualization;


/// The canonical tightly packed 8-bit formats the
/// presentation layer knows how to rasterize.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DisplayFormat {

    /// One 8-bit channel.
    Grayscale8,

    /// Three 8-bit channels, red first.
    Rgb8,

    /// Four 8-bit channels, red first, alpha last.
    Rgba8,
}

impl DisplayFormat {

    /// Number of channels of this display format.
    pub fn channel_count(self) -> u32 {
        match self {
            DisplayFormat::Grayscale8 => 1,
            DisplayFormat::Rgb8 => 3,
            DisplayFormat::Rgba8 => 4,
        }
    }

    /// Number of bytes per displayed pixel.
    pub fn bytes_per_pixel(self) -> u64 {
        self.channel_count() as u64
    }

    /// The raw pixel format with the identical byte layout.
    pub fn to_pixel_format(self) -> PixelFormat {
        match self {
            DisplayFormat::Grayscale8 => PixelFormat::R8,
            DisplayFormat::Rgb8 => PixelFormat::Rgb8,
            DisplayFormat::Rgba8 => PixelFormat::Rgba8,
        }
    }
}

/// The display format whose byte layout matches the raw format
/// exactly, if one exists. Only these render without conversion.
pub fn native_display_format(pixel_format: PixelFormat) -> Option<DisplayFormat> {
    match pixel_format {
        PixelFormat::R8 => Some(DisplayFormat::Grayscale8),
        PixelFormat::Rgb8 => Some(DisplayFormat::Rgb8),
        PixelFormat::Rgba8 => Some(DisplayFormat::Rgba8),
        _ => None,
    }
}

/// Whether the raw bytes of this format can be rasterized
/// directly, without any conversion.
pub fn can_render_natively(pixel_format: PixelFormat) -> bool {
    native_display_format(pixel_format).is_some()
}

/// Whether displaying this texture can be attempted at all.
///
/// Block-compressed formats cannot: no block decoder is in scope.
/// For every other format a conversion is attempted, and an
/// unregistered pair then fails explicitly in the converter.
pub fn can_display(pixel_format: PixelFormat, _channel_type: ChannelType) -> bool {
    !pixel_format.is_compressed()
}

/// Whether per-channel statistics can be computed for this format.
pub fn can_compute_min_max(pixel_format: PixelFormat) -> bool {
    !pixel_format.is_compressed()
}


/// One displayable image: the bytes of a single mip level and layer
/// in a canonical format, plus the extents to show it at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DisplayFrame<'t> {

    /// The extent of the displayed mip level.
    pub dimensions: Dimensions,

    /// The canonical layout of `bytes`.
    pub format: DisplayFormat,

    /// The tightly packed pixel bytes, borrowed without copying.
    pub bytes: &'t [u8],

    /// Where scaling to base was requested for a higher mip level,
    /// the target extent to resample to. The resampling itself is
    /// the presentation layer's concern.
    pub scale_to: Option<Dimensions>,
}


/// Serves displayable frames for every mip level and array layer
/// of one texture.
///
/// Construction classifies the format and converts the raw buffer
/// right away where required, so that every later [`frame`] call
/// is a cheap slice into already resident memory.
///
/// [`frame`]: Self::frame
#[derive(Debug)]
pub struct DisplaySource<'t> {
    texture: &'t Texture,
    visualization: FloatVisualization,
    converted: Option<ConvertedChain>,
}

impl<'t> DisplaySource<'t> {

    /// Prepare display of a texture, converting the raw buffer
    /// eagerly where the format requires it.
    pub fn new(texture: &'t Texture, visualization: FloatVisualization) -> Result<Self> {
        let converted =
            if can_render_natively(texture.layout().pixel_format) { None }
            else { Some(convert(texture, visualization)?) };

        Ok(DisplaySource { texture, visualization, converted })
    }

    /// Use a conversion that was already computed elsewhere,
    /// for example on a background thread.
    pub fn with_prepared(texture: &'t Texture, visualization: FloatVisualization, prepared: ConvertedChain) -> Result<Self> {
        let layout = texture.layout();

        let expected = conversion_for(layout.pixel_format, layout.channel_type)
            .ok_or_else(|| Error::unsupported(layout.pixel_format, layout.channel_type))?;

        if prepared.format() != expected.1 || prepared.layout().dimensions != layout.dimensions {
            return Err(Error::invalid("prepared conversion does not belong to this texture"));
        }

        Ok(DisplaySource { texture, visualization, converted: Some(prepared) })
    }

    /// The texture frames are served from.
    pub fn texture(&self) -> &'t Texture {
        self.texture
    }

    /// The mode float channels are currently visualized with.
    pub fn visualization(&self) -> FloatVisualization {
        self.visualization
    }

    /// Switch the float visualization mode. Rebuilds the converted
    /// buffer wholesale where the conversion depends on the mode,
    /// and is a cheap no-op everywhere else.
    pub fn set_visualization(&mut self, visualization: FloatVisualization) -> UnitResult {
        if visualization == self.visualization {
            return Ok(());
        }

        self.visualization = visualization;

        let layout = self.texture.layout();
        let is_float_conversion = matches!(
            conversion_for(layout.pixel_format, layout.channel_type),
            Some((Conversion::FloatToBytes(_), _))
        );

        if is_float_conversion {
            self.converted = Some(convert(self.texture, visualization)?);
        }

        Ok(())
    }

    /// Assemble the displayable bytes for one mip level and layer.
    ///
    /// Natively displayable formats yield a zero-copy view into the
    /// raw buffer; converted formats yield a view into the converted
    /// buffer, addressed with the converted format's bytes per pixel.
    /// Mip levels beyond the base of a float-converted texture are
    /// unavailable and fail with [`Error::UnsupportedFormat`].
    pub fn frame(&self, mip_index: u32, layer_index: u32, scale_to_base: bool) -> Result<DisplayFrame<'_>> {
        let layout = self.texture.layout();

        // this is the enforcement boundary for indices;
        // nothing below touches any buffer before these checks pass
        let dimensions = layout.mip_dimensions(mip_index)?;
        layout.check_layer(layer_index)?;

        let (format, bytes) = match native_display_format(layout.pixel_format) {
            Some(native) => (native, self.texture.layer_span(mip_index, layer_index)?),

            None => {
                let converted = self.converted.as_ref()
                    .ok_or_else(|| Error::unsupported(layout.pixel_format, layout.channel_type))?;

                // float conversions cover the base level only
                if mip_index >= converted.layout().mip_count {
                    return Err(Error::unsupported(layout.pixel_format, layout.channel_type));
                }

                (converted.format(), converted.layer_span(mip_index, layer_index)?)
            }
        };

        let scale_to = if scale_to_base && mip_index > 0 {
            // every axis was shifted down `mip_index` times to produce
            // this level, so shifting back up cannot overflow; clamped
            // axes stop at the base extent instead of outgrowing it
            let base = layout.dimensions;
            Some(Dimensions::new(
                (dimensions.width << mip_index).min(base.width),
                (dimensions.height << mip_index).min(base.height),
                (dimensions.depth << mip_index).min(base.depth),
            ))
        } else { None };

        Ok(DisplayFrame { dimensions, format, bytes, scale_to })
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Dimensions;
    use crate::meta::TextureLayout;
    use crate::meta::format::*;

    fn layout(dimensions: Dimensions, pixel_format: PixelFormat, channel_type: ChannelType, mip_count: u32, layer_count: u32) -> TextureLayout {
        TextureLayout {
            dimensions, pixel_format, channel_type,
            color_space: ColorSpace::Linear,
            texture_type: TextureType::Single2D,
            mip_count, layer_count,
            source_format: FileFormat::Png,
        }
    }

    #[test]
    fn classifier_table() {
        assert!(can_render_natively(PixelFormat::R8));
        assert!(can_render_natively(PixelFormat::Rgb8));
        assert!(can_render_natively(PixelFormat::Rgba8));
        assert!(!can_render_natively(PixelFormat::Bgra8));
        assert!(!can_render_natively(PixelFormat::Rgb16));

        // uncompressed formats may always be attempted,
        // even where no conversion is registered yet
        assert!(can_display(PixelFormat::Rg8, ChannelType::UnsignedNormalized));
        assert!(!can_display(PixelFormat::Bc1Rgb, ChannelType::UnsignedNormalized));

        assert!(can_compute_min_max(PixelFormat::Rgba8));
        assert!(!can_compute_min_max(PixelFormat::Bc7Rgba));
    }

    #[test]
    fn native_frames_borrow_the_raw_buffer() {
        let texture = Texture::new(
            layout(Dimensions::new(2, 2, 1), PixelFormat::Rgba8, ChannelType::UnsignedNormalized, 1, 1),
            (0..16).collect(),
        ).unwrap();

        let source = DisplaySource::new(&texture, FloatVisualization::default()).unwrap();
        let frame = source.frame(0, 0, false).unwrap();

        assert_eq!(frame.format, DisplayFormat::Rgba8);
        assert_eq!(frame.dimensions, Dimensions::new(2, 2, 1));
        assert_eq!(frame.scale_to, None);

        let span = texture.layer_span(0, 0).unwrap();
        assert!(std::ptr::eq(frame.bytes.as_ptr(), span.as_ptr()));
    }

    #[test]
    fn out_of_range_indices_never_touch_the_buffer() {
        let texture = Texture::new(
            layout(Dimensions::new(2, 2, 1), PixelFormat::Rgba8, ChannelType::UnsignedNormalized, 2, 2),
            vec![0; 40],
        ).unwrap();

        let source = DisplaySource::new(&texture, FloatVisualization::default()).unwrap();

        assert!(matches!(
            source.frame(2, 0, false),
            Err(Error::IndexOutOfRange { what: "mip level", index: 2, count: 2 })
        ));

        assert!(matches!(
            source.frame(0, 2, false),
            Err(Error::IndexOutOfRange { what: "array layer", index: 2, count: 2 })
        ));
    }

    #[test]
    fn converted_frames_use_the_destination_pixel_size() {
        let source_layout = layout(Dimensions::new(2, 2, 1), PixelFormat::Rgb8, ChannelType::UnsignedNormalized, 2, 1);
        let buffer = vec![0; source_layout.total_size().unwrap() as usize];
        let texture = Texture::new(source_layout, buffer).unwrap();

        let source = DisplaySource::new(&texture, FloatVisualization::default()).unwrap();

        let base = source.frame(0, 0, false).unwrap();
        assert_eq!(base.format, DisplayFormat::Rgba8);
        assert_eq!(base.bytes.len(), 2 * 2 * 4);

        let mip = source.frame(1, 0, false).unwrap();
        assert_eq!(mip.bytes.len(), 4);
    }

    #[test]
    fn float_textures_lose_their_higher_mips() {
        let source_layout = layout(Dimensions::new(2, 1, 1), PixelFormat::R32, ChannelType::SignedFloat, 2, 1);
        let buffer: Vec<u8> = [0.25_f32, 0.75, 0.5].iter()
            .flat_map(|value| value.to_ne_bytes().to_vec())
            .collect();
        let texture = Texture::new(source_layout, buffer).unwrap();

        let source = DisplaySource::new(&texture, FloatVisualization::Clamp).unwrap();

        assert!(source.frame(0, 0, false).is_ok());
        assert!(matches!(
            source.frame(1, 0, false),
            Err(Error::UnsupportedFormat { pixel_format: PixelFormat::R32, .. })
        ));
    }

    #[test]
    fn switching_the_visualization_rebuilds_the_bytes() {
        let source_layout = layout(Dimensions::new(2, 1, 1), PixelFormat::R32, ChannelType::SignedFloat, 1, 1);
        let buffer: Vec<u8> = [0.5_f32, 2.0].iter()
            .flat_map(|value| value.to_ne_bytes().to_vec())
            .collect();
        let texture = Texture::new(source_layout, buffer).unwrap();

        let mut source = DisplaySource::new(&texture, FloatVisualization::Remap).unwrap();
        assert_eq!(source.frame(0, 0, false).unwrap().bytes, &[0, 255]);

        source.set_visualization(FloatVisualization::Clamp).unwrap();
        assert_eq!(source.frame(0, 0, false).unwrap().bytes, &[128, 255]);
    }

    #[test]
    fn scaling_to_base_reports_the_upscaled_extent() {
        let texture = Texture::new(
            layout(Dimensions::new(16, 8, 1), PixelFormat::R8, ChannelType::UnsignedNormalized, 5, 1),
            vec![0; 16 * 8 + 8 * 4 + 4 * 2 + 2 + 1],
        ).unwrap();

        let source = DisplaySource::new(&texture, FloatVisualization::default()).unwrap();

        let frame = source.frame(2, 0, true).unwrap();
        assert_eq!(frame.dimensions, Dimensions::new(4, 2, 1));
        assert_eq!(frame.scale_to, Some(Dimensions::new(16, 8, 1)));

        // axes that clamped at one texel scale back up
        // to the base extent, never beyond it
        let smallest = source.frame(4, 0, true).unwrap();
        assert_eq!(smallest.dimensions, Dimensions::new(1, 1, 1));
        assert_eq!(smallest.scale_to, Some(Dimensions::new(16, 8, 1)));

        let unscaled = source.frame(2, 0, false).unwrap();
        assert_eq!(unscaled.scale_to, None);
    }

    #[test]
    fn prepared_conversions_must_match_the_texture() {
        let source_layout = layout(Dimensions::new(2, 1, 1), PixelFormat::Rgb8, ChannelType::UnsignedNormalized, 1, 1);
        let texture = Texture::new(source_layout, vec![0; 6]).unwrap();
        let prepared = convert(&texture, FloatVisualization::default()).unwrap();

        assert!(DisplaySource::with_prepared(&texture, FloatVisualization::default(), prepared.clone()).is_ok());

        let other_layout = layout(Dimensions::new(4, 1, 1), PixelFormat::Rgb8, ChannelType::UnsignedNormalized, 1, 1);
        let other = Texture::new(other_layout, vec![0; 12]).unwrap();
        assert!(DisplaySource::with_prepared(&other, FloatVisualization::default(), prepared).is_err());
    }
}
