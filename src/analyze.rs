
//! Per-channel minimum and maximum statistics over the raw pixel
//! data of every mip level and array layer of a texture.
//!
//! The extrema keep the numeric kind their source channel is stored
//! as. A 16-bit unsigned channel reports 64-bit unsigned extrema,
//! never a narrowed or float-converted value.

use ::half::f16;
use ::smallvec::SmallVec;

use crate::display::can_compute_min_max;
use crate::error::{Error, Result};
use crate::meta::format::{ChannelType, PixelFormat};
use crate::texture::Texture;


/// A single raw channel extremum, tagged with the numeric kind
/// the source channel is stored as.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChannelValue {

    /// An extremum of a signed integer channel.
    I64(i64),

    /// An extremum of an unsigned integer channel.
    U64(u64),

    /// An extremum of a float channel, widened without loss.
    F64(f64),
}

impl ChannelValue {

    /// The value as a float, for uniform presentation.
    /// Large 64-bit integers lose precision.
    pub fn to_f64(self) -> f64 {
        match self {
            ChannelValue::I64(value) => value as f64,
            ChannelValue::U64(value) => value as f64,
            ChannelValue::F64(value) => value,
        }
    }
}

/// The observed extrema of one channel of one (mip, layer) image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelRange {

    /// The smallest observed component value.
    pub min: ChannelValue,

    /// The largest observed component value.
    pub max: ChannelValue,
}

/// Statistics of one (mip, layer) image: one optional range per
/// channel slot. A slot is `None` where the pixel format has no
/// such channel — never a defaulted number, so "no alpha" can not
/// be mistaken for "alpha is always zero".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerRanges {
    channels: [Option<ChannelRange>; 4],
}

impl LayerRanges {

    /// The range of the given channel slot. `None` where the format
    /// has no such channel, or where a float channel contained no
    /// finite value at all.
    pub fn channel(&self, channel_index: usize) -> Option<ChannelRange> {
        self.channels.get(channel_index).copied().flatten()
    }
}

/// Minimum and maximum channel values for every mip level and
/// array layer of one texture. Computed once after load and
/// read many times; replaced wholesale, never updated.
#[derive(Clone, Debug, PartialEq)]
pub struct MinMaxReport {
    mips: SmallVec<[Vec<LayerRanges>; 16]>,
}

impl MinMaxReport {

    /// Number of analyzed mip levels.
    pub fn mip_count(&self) -> u32 {
        self.mips.len() as u32
    }

    /// The statistics of one mip level and array layer.
    pub fn layer(&self, mip_index: u32, layer_index: u32) -> Result<&LayerRanges> {
        let mip = self.mips.get(mip_index as usize)
            .ok_or(Error::IndexOutOfRange {
                what: "mip level", index: mip_index, count: self.mips.len() as u32,
            })?;

        mip.get(layer_index as usize)
            .ok_or(Error::IndexOutOfRange {
                what: "array layer", index: layer_index, count: mip.len() as u32,
            })
    }
}


/// Scan all pixels of every mip level and array layer.
///
/// Formats without a registered component interpretation, including
/// all block-compressed formats, fail with
/// [`Error::UnsupportedFormat`] instead of producing zero-filled
/// statistics.
pub fn analyze(texture: &Texture) -> Result<MinMaxReport> {
    analyze_with_progress(texture, |_| true)
}

/// Scan all pixels, reporting the completed fraction after each
/// (mip, layer) image. Returning `false` from the callback cancels
/// the scan with [`Error::Aborted`].
pub fn analyze_with_progress(
    texture: &Texture,
    mut on_progress: impl FnMut(f64) -> bool,
) -> Result<MinMaxReport>
{
    let layout = texture.layout();

    if !can_compute_min_max(layout.pixel_format) {
        return Err(Error::unsupported(layout.pixel_format, layout.channel_type));
    }

    let kind = ComponentKind::of(layout.pixel_format, layout.channel_type)
        .ok_or_else(|| Error::unsupported(layout.pixel_format, layout.channel_type))?;

    let channel_count = layout.pixel_format.channel_count() as usize;

    let image_count = (layout.mip_count as u64 * layout.layer_count as u64) as f64;
    let mut scanned = 0_u64;

    let mut mips = SmallVec::new();
    for mip_index in 0..layout.mip_count {
        let mut layers = Vec::with_capacity(layout.layer_count as usize);

        for layer_index in 0..layout.layer_count {
            let bytes = texture.layer_span(mip_index, layer_index)?;
            layers.push(scan_image(bytes, channel_count, kind));

            scanned += 1;
            if !on_progress(scanned as f64 / image_count) {
                return Err(Error::Aborted);
            }
        }

        mips.push(layers);
    }

    Ok(MinMaxReport { mips })
}


/// How the analyzer reads one raw component.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ComponentKind { U8, U16, U32, I8, I16, I32, F16, F32 }

impl ComponentKind {

    /// The component interpretation of a format pair, or `None`
    /// where the pair has no per-texel numeric meaning.
    fn of(pixel_format: PixelFormat, channel_type: ChannelType) -> Option<Self> {
        use ChannelType::*;
        use ComponentKind::*;

        let bytes = pixel_format.bytes_per_channel()?;

        match channel_type {
            UnsignedNormalized | UnsignedInteger | UnsignedScaled | Srgb => match bytes {
                1 => Some(U8), 2 => Some(U16), 4 => Some(U32),
                _ => None,
            },

            SignedNormalized | SignedInteger | SignedScaled => match bytes {
                1 => Some(I8), 2 => Some(I16), 4 => Some(I32),
                _ => None,
            },

            // there is no 8-bit float storage
            UnsignedFloat | SignedFloat => match bytes {
                2 => Some(F16), 4 => Some(F32),
                _ => None,
            },
        }
    }
}

fn scan_image(bytes: &[u8], channel_count: usize, kind: ComponentKind) -> LayerRanges {
    use ComponentKind::*;

    let channels = match kind {
        U8 => tag(scan(bytes, channel_count, 1, |b| b[0] as u64), ChannelValue::U64),
        U16 => tag(scan(bytes, channel_count, 2, |b| u16::from_ne_bytes([b[0], b[1]]) as u64), ChannelValue::U64),
        U32 => tag(scan(bytes, channel_count, 4, |b| u32::from_ne_bytes([b[0], b[1], b[2], b[3]]) as u64), ChannelValue::U64),

        I8 => tag(scan(bytes, channel_count, 1, |b| b[0] as i8 as i64), ChannelValue::I64),
        I16 => tag(scan(bytes, channel_count, 2, |b| i16::from_ne_bytes([b[0], b[1]]) as i64), ChannelValue::I64),
        I32 => tag(scan(bytes, channel_count, 4, |b| i32::from_ne_bytes([b[0], b[1], b[2], b[3]]) as i64), ChannelValue::I64),

        F16 => tag(scan(bytes, channel_count, 2, |b| f16::from_ne_bytes([b[0], b[1]]).to_f64()), ChannelValue::F64),
        F32 => tag(scan(bytes, channel_count, 4, |b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]) as f64), ChannelValue::F64),
    };

    LayerRanges { channels }
}

// attach the numeric kind the source channel is stored as
fn tag<T: Copy>(
    ranges: [Option<(T, T)>; 4],
    into_value: impl Fn(T) -> ChannelValue,
) -> [Option<ChannelRange>; 4]
{
    ranges.map(|range| range.map(|(min, max)| ChannelRange {
        min: into_value(min),
        max: into_value(max),
    }))
}

// one pass over interleaved components, each channel accumulated
// independently; the max slot compares against the max slot
fn scan<T: PartialOrd + Copy>(
    bytes: &[u8],
    channel_count: usize,
    bytes_per_channel: usize,
    parse: impl Fn(&[u8]) -> T,
) -> [Option<(T, T)>; 4]
{
    let mut ranges: [Option<(T, T)>; 4] = [None; 4];

    for pixel in bytes.chunks_exact(channel_count * bytes_per_channel) {
        for (channel_index, channel) in pixel.chunks_exact(bytes_per_channel).enumerate() {
            let value = parse(channel);

            match &mut ranges[channel_index] {
                Some((min, max)) => {
                    if value < *min { *min = value; }
                    if value > *max { *max = value; }
                }

                // NaN is not equal to itself and never starts a range
                none => if value == value {
                    *none = Some((value, value));
                }
            }
        }
    }

    ranges
}
