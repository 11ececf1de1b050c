//! `icons` fragment of a WebExtension `manifest.json`
//!
//! The toolbar icon generator can emit this next to its PNGs so the
//! packaging step can merge it into the extension manifest instead of
//! listing every size by hand.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{collections::BTreeMap, path::Path};

/// Root structure of the manifest fragment
///
/// Serializes as `{ "icons": { "16": "assets/icons/icon-16.png", ... } }`.
/// Keys are ordered by numeric size.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct IconManifest {
    /// Icon path per pixel size, relative to the extension root
    pub icons: BTreeMap<u32, String>,
}

impl IconManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the icon for `size`
    ///
    /// # Arguments
    /// * `size` - Edge length of the square icon in pixels
    /// * `path` - Path to the icon as the manifest should reference it
    pub fn add_icon(&mut self, size: u32, path: String) {
        self.icons.insert(size, path);
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize icon manifest")
    }

    /// Write the fragment to `path`, replacing any existing file
    ///
    /// # Errors
    /// Returns an error if serialization fails or the file can't be written.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write icon manifest {}", path.display()))
    }
}
