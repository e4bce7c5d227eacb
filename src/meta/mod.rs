
//! Describes the memory layout of a packed texture
//! and computes all byte offsets inside its buffer.
//!
//! Every mip level and array layer of a texture lives in one
//! contiguous buffer, packed mip-major, then layer-major, then
//! row-major. All sizes and offsets derive from the same two
//! functions, [`Dimensions::mip`] and
//! [`PixelFormat::bytes_per_pixel`], which keeps the offset math
//! mutually consistent across the whole crate.

pub mod format;

use ::smallvec::SmallVec;
use crate::error::{Error, Result, UnitResult};
use crate::math::{Dimensions, floor_log_2};
use self::format::*;


/// Byte offset of every mip level inside a packed buffer, ascending.
pub type MipOffsets = SmallVec<[u64; 16]>;

/// Describes extent, format and sub-image counts of a packed texture.
/// Immutable once constructed; all methods are pure.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TextureLayout {

    /// The extent of the base mip level.
    pub dimensions: Dimensions,

    /// The raw memory layout of a single texel.
    pub pixel_format: PixelFormat,

    /// The numeric interpretation of each channel.
    pub channel_type: ChannelType,

    /// The transfer function the values are encoded with.
    pub color_space: ColorSpace,

    /// The shape of the texture. Informational.
    pub texture_type: TextureType,

    /// Number of mip levels, including the base level. At least one.
    pub mip_count: u32,

    /// Number of array layers. One for non-array textures.
    pub layer_count: u32,

    /// The file format the texture was decoded from. Informational.
    pub source_format: FileFormat,
}

impl TextureLayout {

    /// Validate that the counts and extents describe a possible texture.
    pub fn validate(&self) -> UnitResult {
        if self.dimensions.has_zero_axis() {
            return Err(Error::invalid("dimensions must not contain a zero axis"));
        }

        if self.mip_count == 0 {
            return Err(Error::invalid("mip count must be at least one"));
        }

        if self.layer_count == 0 {
            return Err(Error::invalid("layer count must be at least one"));
        }

        if self.mip_count > full_mip_chain_len(self.dimensions) {
            return Err(Error::invalid("mip chain is longer than the base dimensions allow"));
        }

        Ok(())
    }

    /// The extent of the specified mip level.
    pub fn mip_dimensions(&self, mip_index: u32) -> Result<Dimensions> {
        self.check_mip(mip_index)?;
        Ok(self.dimensions.mip(mip_index))
    }

    /// Number of bytes a single layer of the specified mip level occupies.
    pub fn bytes_per_layer(&self, mip_index: u32) -> Result<u64> {
        self.check_mip(mip_index)?;
        self.layer_bytes_of(self.dimensions.mip(mip_index))
    }

    /// Number of bytes all layers of the specified mip level occupy together.
    pub fn mip_size(&self, mip_index: u32) -> Result<u64> {
        self.bytes_per_layer(mip_index)?
            .checked_mul(self.layer_count as u64)
            .ok_or_else(too_large)
    }

    /// Byte offset of the first layer of the specified mip level
    /// inside the packed buffer. Strictly increasing in the mip index.
    pub fn mip_offset(&self, mip_index: u32) -> Result<u64> {
        self.check_mip(mip_index)?;
        self.packed_bytes_until(mip_index)
    }

    /// Byte offset of one layer of one mip level inside the packed buffer.
    pub fn layer_offset(&self, mip_index: u32, layer_index: u32) -> Result<u64> {
        self.check_layer(layer_index)?;

        let mip_offset = self.mip_offset(mip_index)?;
        let layer_bytes = self.layer_bytes_of(self.dimensions.mip(mip_index))?;

        layer_bytes.checked_mul(layer_index as u64)
            .and_then(|layer_bytes| mip_offset.checked_add(layer_bytes))
            .ok_or_else(too_large)
    }

    /// The exact buffer size the packed mip chain requires.
    pub fn total_size(&self) -> Result<u64> {
        self.packed_bytes_until(self.mip_count)
    }

    /// The byte offset of every mip level, in ascending order.
    pub fn mip_offsets(&self) -> Result<MipOffsets> {
        let mut offsets = MipOffsets::with_capacity(self.mip_count as usize);
        let mut offset: u64 = 0;

        for mip_index in 0..self.mip_count {
            offsets.push(offset);

            offset = self.layer_bytes_of(self.dimensions.mip(mip_index))?
                .checked_mul(self.layer_count as u64)
                .and_then(|mip_bytes| offset.checked_add(mip_bytes))
                .ok_or_else(too_large)?;
        }

        Ok(offsets)
    }

    // offsets and the total size share this one accumulation,
    // so they can never disagree about where a mip level starts
    fn packed_bytes_until(&self, mip_end: u32) -> Result<u64> {
        let mut offset: u64 = 0;

        for mip_index in 0..mip_end {
            offset = self.layer_bytes_of(self.dimensions.mip(mip_index))?
                .checked_mul(self.layer_count as u64)
                .and_then(|mip_bytes| offset.checked_add(mip_bytes))
                .ok_or_else(too_large)?;
        }

        Ok(offset)
    }

    fn layer_bytes_of(&self, dimensions: Dimensions) -> Result<u64> {
        let bytes_per_pixel = self.pixel_format.bytes_per_pixel()
            .ok_or_else(|| Error::unsupported(self.pixel_format, self.channel_type))?;

        dimensions.texel_count()
            .and_then(|texels| texels.checked_mul(bytes_per_pixel))
            .ok_or_else(too_large)
    }

    fn check_mip(&self, mip_index: u32) -> UnitResult {
        if mip_index >= self.mip_count {
            return Err(Error::IndexOutOfRange {
                what: "mip level", index: mip_index, count: self.mip_count,
            });
        }

        Ok(())
    }

    pub(crate) fn check_layer(&self, layer_index: u32) -> UnitResult {
        if layer_index >= self.layer_count {
            return Err(Error::IndexOutOfRange {
                what: "array layer", index: layer_index, count: self.layer_count,
            });
        }

        Ok(())
    }
}

/// Number of levels in the longest possible mip chain of these
/// dimensions: halving every axis until all of them reach one texel.
pub fn full_mip_chain_len(dimensions: Dimensions) -> u32 {
    floor_log_2(dimensions.width.max(dimensions.height).max(dimensions.depth)) + 1
}

fn too_large() -> Error {
    Error::invalid("texture size exceeds 64 bit addressing")
}
