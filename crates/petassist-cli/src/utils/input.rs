//! Reading command input from arguments, stdin and image files.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result};
use petassist_core::{ImageInput, media_type_for_extension};

use crate::error::CliError;

/// Use `text` if given, otherwise read all of piped stdin.
pub fn text_or_stdin(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(CliError::Arguments("no text given and nothing piped on stdin".into()).into());
    }
    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

/// Load an image from a `data:image/...` URL or a file path.
pub fn load_image(source: &str) -> Result<ImageInput, CliError> {
    if source.starts_with("data:") {
        return Ok(ImageInput::from_data_url(source)?);
    }

    let path = Path::new(source);
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let media_type = media_type_for_extension(extension).ok_or_else(|| {
        CliError::Arguments(format!(
            "unsupported image type '{}' (expected png, jpg, jpeg, webp or gif)",
            path.display()
        ))
    })?;

    let data = std::fs::read(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    Ok(ImageInput::from_bytes(media_type, data)?)
}
