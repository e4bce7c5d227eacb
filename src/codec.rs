
//! The seams the external decode and encode libraries plug into.
//!
//! This crate never parses or writes any file format itself. A decoder
//! produces the [`Texture`] described in [`crate::texture`]; an encoder
//! consumes one through a minimal byte sink. Both sides are traits so
//! the viewer can swap codec libraries without touching this core.

use std::fmt;
use std::io;

use crate::meta::TextureLayout;
use crate::texture::Texture;


/// Why a decoder rejected a byte stream.
#[derive(Debug)]
pub enum LoadError {

    /// The bytes look like a known file format, but their
    /// contents are contradicting or truncated.
    CorruptData,

    /// The bytes are no file format the decoder knows.
    UnsupportedFile,
}

impl fmt::Display for LoadError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            LoadError::CorruptData => "the file contents are corrupt",
            LoadError::UnsupportedFile => "the file format is not supported",
        })
    }
}

impl std::error::Error for LoadError {}


/// Why an encoder could not write a texture.
#[derive(Debug)]
pub enum SaveError {

    /// The encoder's file format cannot represent this layout.
    /// Consult [`WriteTexture::can_save`] before offering export.
    UnsupportedLayout,

    /// The sink failed while the encoded bytes were written.
    Io(io::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::UnsupportedLayout =>
                write!(formatter, "the file format cannot represent this texture layout"),

            SaveError::Io(error) =>
                write!(formatter, "writing the encoded texture failed: {}", error),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(error) => Some(error),
            SaveError::UnsupportedLayout => None,
        }
    }
}

impl From<io::Error> for SaveError {
    fn from(error: io::Error) -> Self {
        SaveError::Io(error)
    }
}


/// Decodes a file into a packed texture.
pub trait ReadTexture {

    /// Decode the complete in-memory contents of one file.
    fn load(&self, bytes: &[u8]) -> Result<Texture, LoadError>;
}

/// Receives the encoded bytes of a texture, in order.
///
/// Object-safe on purpose, so an encoder can take
/// `&mut dyn ByteSink` without growing generic parameters.
pub trait ByteSink {

    /// Append the given bytes to the sink.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

// anything writable is a sink, including `Vec<u8>` and files
impl<W: io::Write> ByteSink for W {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_all(bytes)
    }
}

/// Encodes a packed texture into a byte sink.
pub trait WriteTexture {

    /// Whether this encoder's file format can represent the layout.
    /// Consulted before export is offered to the user.
    fn can_save(&self, layout: &TextureLayout) -> bool;

    /// Encode the texture and write all of its bytes into the sink.
    fn save(&self, texture: &Texture, sink: &mut dyn ByteSink) -> Result<(), SaveError>;
}
