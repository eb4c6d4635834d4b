use std::path::{Path, PathBuf};

use crate::core::error::TagError;

/// Cover image bytes + MIME type, ready for an APIC frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    pub data: Vec<u8>,
    pub mime: String,
}

/// Load a cover image. A missing file is "no cover", not an error.
pub fn load_cover(path: &Path) -> Result<Option<Cover>, TagError> {
    if !path.exists() {
        return Ok(None);
    }

    let data = std::fs::read(path).map_err(|source| TagError::Cover {
        path: PathBuf::from(path),
        source,
    })?;

    Ok(Some(Cover {
        data,
        mime: cover_mime(path),
    }))
}

/// `jpg`/`jpeg` -> `image/jpeg`, anything else -> `image/{ext}` (lowercased).
pub fn cover_mime(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        _ => format!("image/{ext}"),
    }
}
