use alloc::string::String;
use thiserror::Error;

/// Broad classification of a [`PickError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing palette data. Fatal to a session.
    Configuration,
    /// A malformed query, coordinate or buffer. The caller may skip it and continue.
    InvalidInput,
}

#[derive(Debug, Error)]
pub enum PickError {
    /// A palette was built or loaded with zero entries.
    #[error("palette has no entries")]
    EmptyPalette,

    /// The palette file could not be opened or read.
    #[cfg(feature = "std")]
    #[error("cannot read palette file {path}: {source}")]
    PaletteIo {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A palette row has the wrong number of fields or an empty field.
    #[error("palette line {line}: {reason}")]
    MalformedRow { line: usize, reason: &'static str },

    /// A palette row has a color channel that is not an integer in 0..=255.
    #[error("palette line {line}: {channel} value {value:?} is not an integer in 0..=255")]
    InvalidRowComponent {
        line: usize,
        channel: char,
        value: String,
    },

    /// A query channel is outside 0..=255.
    #[error("{channel} component {value} is outside 0..=255")]
    InvalidComponent { channel: char, value: i64 },

    /// Width or height is zero.
    #[error("image dimensions cannot be zero")]
    ZeroDimension,

    /// The display size limit is zero.
    #[error("max display dimension cannot be zero")]
    ZeroMaxDimension,

    /// A point lies outside the image it refers to.
    #[error("coordinate ({x}, {y}) is outside {width}x{height}")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// A pixel buffer's length disagrees with its stated dimensions.
    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    /// An image side does not fit in `u32` pixel coordinates.
    #[error("image {width}x{height} is too large, sides are limited to {} pixels", u32::MAX)]
    ImageTooLarge { width: usize, height: usize },

    /// A pick was requested before any image was loaded.
    #[error("no image loaded")]
    NoImage,
}

impl PickError {
    /// Which class of failure this is. Configuration errors end the session.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyPalette | Self::MalformedRow { .. } | Self::InvalidRowComponent { .. } => {
                ErrorKind::Configuration
            }
            #[cfg(feature = "std")]
            Self::PaletteIo { .. } => ErrorKind::Configuration,
            Self::InvalidComponent { .. }
            | Self::ZeroDimension
            | Self::ZeroMaxDimension
            | Self::OutOfBounds { .. }
            | Self::DimensionMismatch { .. }
            | Self::ImageTooLarge { .. }
            | Self::NoImage => ErrorKind::InvalidInput,
        }
    }

    /// Whether the session can skip the failed input and keep going.
    pub fn is_recoverable(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}
