//! JSON summary of one split: session id, per-track display titles and paths, album info.

use std::path::Path;

use serde::Serialize;

use crate::core::naming::display_title;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Manifest {
    pub session: String,
    pub tracks: Vec<ManifestTrack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ManifestTrack {
    pub title: String,
    pub path: String,
}

impl Manifest {
    /// Build from produced file names; paths are `session_dir/file_name`.
    pub fn new(session: &str, session_dir: &Path, file_names: &[String]) -> Self {
        let tracks = file_names
            .iter()
            .map(|name| ManifestTrack {
                title: display_title(name).to_string(),
                path: session_dir.join(name).display().to_string(),
            })
            .collect();

        Self {
            session: session.to_string(),
            tracks,
            album: None,
            cover: None,
            year: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
