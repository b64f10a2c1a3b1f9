//! Reading SQL scripts from disk

use std::path::Path;

use encoding_rs::{Encoding, WINDOWS_1252};
use tracing::{debug, warn};

use crate::error::SchemaError;

/// Resolve an encoding label (e.g. `gbk`, `latin1`), defaulting to Windows-1252
pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding, SchemaError> {
    match label {
        None => Ok(WINDOWS_1252),
        Some(label) => {
            Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
                SchemaError::UnknownEncoding {
                    label: label.to_string(),
                }
            })
        }
    }
}

/// Decode raw bytes, trying UTF-8 first, then `fallback`
fn decode_with_fallback(bytes: Vec<u8>, fallback: &'static Encoding) -> std::io::Result<String> {
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(err) => {
            let bytes = err.into_bytes();
            let (decoded, _, had_errors) = fallback.decode(&bytes);
            if had_errors {
                Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("File is neither UTF-8 nor valid {}", fallback.name()),
                ))
            } else {
                warn!(encoding = fallback.name(), "input is not UTF-8, decoded with fallback");
                Ok(decoded.into_owned())
            }
        }
    }
}

/// Read a whole SQL script into memory
///
/// The UTF-8 BOM, when present, is stripped so it never ends up glued to the
/// first statement.
pub fn read_script(path: &Path, fallback: &'static Encoding) -> Result<String, SchemaError> {
    let to_error = |source| SchemaError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let bytes = std::fs::read(path).map_err(to_error)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read input script");

    let content = decode_with_fallback(bytes, fallback).map_err(to_error)?;
    match content.strip_prefix('\u{FEFF}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(content),
    }
}
