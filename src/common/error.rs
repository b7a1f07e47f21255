use std::fmt::{Debug, Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum QraftError {
    // Style configuration
    InvalidRenderSize(u32),

    // Logo upload
    LogoTooLarge(usize),
    LogoDecodeFailed,

    // Export
    ImageEncodeFailed(String),
    ClipboardUnavailable(String),

    // Gallery store
    StoreReadFailed(String),
    StoreWriteFailed(String),
    StoreSerializeFailed(String),
    EntryNotFound(String),
}

impl Display for QraftError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Self::InvalidRenderSize(sz) => {
                write!(f, "Render size {sz}px is outside the supported 100-1000px range")
            }
            Self::LogoTooLarge(sz) => {
                write!(f, "Logo file is {sz} bytes, larger than the 1 MiB limit")
            }
            Self::LogoDecodeFailed => f.write_str("Logo file could not be decoded as an image"),
            Self::ImageEncodeFailed(e) => write!(f, "Failed to encode raster export: {e}"),
            Self::ClipboardUnavailable(e) => write!(f, "Clipboard is unavailable: {e}"),
            Self::StoreReadFailed(e) => write!(f, "Failed to read saved gallery: {e}"),
            Self::StoreWriteFailed(e) => write!(f, "Failed to write saved gallery: {e}"),
            Self::StoreSerializeFailed(e) => write!(f, "Failed to serialize saved gallery: {e}"),
            Self::EntryNotFound(id) => write!(f, "No saved entry with id {id}"),
        }
    }
}

impl std::error::Error for QraftError {}

pub type QraftResult<T> = Result<T, QraftError>;
