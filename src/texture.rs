
//! A packed texture: one layout descriptor plus one contiguous
//! buffer holding every mip level and array layer.

use crate::error::{Error, Result, u64_to_usize};
use crate::meta::TextureLayout;


/// An immutably packed texture, created once per decoded file.
///
/// The buffer length always equals the exact packed size of the
/// layout, so every offset the layout computes is addressable.
/// All reads go through validated spans; a range that does not fit
/// is reported as [`Error::LayoutOverflow`] instead of being read.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Texture {
    layout: TextureLayout,
    buffer: Vec<u8>,
}

impl Texture {

    /// Take ownership of a decoded buffer.
    /// The buffer length must equal the packed size of the layout.
    pub fn new(layout: TextureLayout, buffer: Vec<u8>) -> Result<Self> {
        layout.validate()?;

        let expected = layout.total_size()?;
        if buffer.len() as u64 != expected {
            return Err(Error::invalid(format!(
                "buffer length {} does not match the packed size {}",
                buffer.len(), expected,
            )));
        }

        Ok(Texture { layout, buffer })
    }

    /// The layout this buffer is packed with.
    pub fn layout(&self) -> &TextureLayout {
        &self.layout
    }

    /// The whole packed buffer.
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// All layers of one mip level.
    pub fn mip_span(&self, mip_index: u32) -> Result<&[u8]> {
        let offset = self.layout.mip_offset(mip_index)?;
        let length = self.layout.mip_size(mip_index)?;
        self.span(offset, length)
    }

    /// One layer of one mip level.
    pub fn layer_span(&self, mip_index: u32, layer_index: u32) -> Result<&[u8]> {
        let offset = self.layout.layer_offset(mip_index, layer_index)?;
        let length = self.layout.bytes_per_layer(mip_index)?;
        self.span(offset, length)
    }

    /// Give the buffer back, for example to hand it to an encoder.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    // the single place where offset math meets the real buffer
    fn span(&self, offset: u64, length: u64) -> Result<&[u8]> {
        let buffer_size = self.buffer.len() as u64;

        let end = offset.checked_add(length)
            .filter(|&end| end <= buffer_size)
            .ok_or(Error::LayoutOverflow { offset, length, buffer_size })?;

        let start = u64_to_usize(offset, "texture span offset")?;
        let end = u64_to_usize(end, "texture span end")?;
        Ok(&self.buffer[start .. end])
    }
}
