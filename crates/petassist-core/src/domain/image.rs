//! Image payloads handed to the classifier.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImageInputError {
    #[error("Not an image data URL")]
    NotImageDataUrl,

    #[error("Image payload is empty")]
    Empty,

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),
}

/// An image as supplied by the UI: either a data URL or raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageInput {
    DataUrl(String),
    Bytes { media_type: String, data: Vec<u8> },
}

impl ImageInput {
    /// Wrap a `data:image/...` URL.
    pub fn from_data_url(url: impl Into<String>) -> Result<Self, ImageInputError> {
        let url = url.into();
        let Some(rest) = url.strip_prefix("data:image/") else {
            return Err(ImageInputError::NotImageDataUrl);
        };
        match rest.split_once(',') {
            Some((_, payload)) if !payload.is_empty() => Ok(Self::DataUrl(url)),
            Some(_) => Err(ImageInputError::Empty),
            None => Err(ImageInputError::NotImageDataUrl),
        }
    }

    /// Wrap raw image bytes of a known media type.
    pub fn from_bytes(media_type: impl Into<String>, data: Vec<u8>) -> Result<Self, ImageInputError> {
        let media_type = media_type.into();
        if !media_type.starts_with("image/") {
            return Err(ImageInputError::UnsupportedType(media_type));
        }
        if data.is_empty() {
            return Err(ImageInputError::Empty);
        }
        Ok(Self::Bytes { media_type, data })
    }

    /// Render as a data URL, base64-encoding raw bytes.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        match self {
            Self::DataUrl(url) => url.clone(),
            Self::Bytes { media_type, data } => {
                format!("data:{media_type};base64,{}", STANDARD.encode(data))
            }
        }
    }
}

impl std::fmt::Debug for ImageInput {
    // Payloads can be megabytes; never dump them into logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataUrl(url) => f
                .debug_struct("DataUrl")
                .field("len", &url.len())
                .finish(),
            Self::Bytes { media_type, data } => f
                .debug_struct("Bytes")
                .field("media_type", media_type)
                .field("len", &data.len())
                .finish(),
        }
    }
}

/// Media type for a file extension, case-insensitive.
#[must_use]
pub fn media_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
