//! Sprite asset loading.
//!
//! The simulation itself never looks at pixels; it only insists the sprite a
//! renderer needs is present before the first tick.

use crate::error::{Result, SimError};
use std::path::{Path, PathBuf};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Loaded plane sprite.
#[derive(Debug, Clone)]
pub struct SpriteAsset {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl SpriteAsset {
    /// Read and sanity-check a PNG sprite.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path).map_err(|source| SimError::AssetUnreadable {
            path: path.clone(),
            source,
        })?;

        let (width, height) = png_dimensions(&bytes).ok_or_else(|| SimError::AssetInvalid {
            path: path.clone(),
            reason: "not a PNG image".to_string(),
        })?;
        if width == 0 || height == 0 {
            return Err(SimError::AssetInvalid {
                path,
                reason: format!("empty image ({width}x{height})"),
            });
        }

        Ok(Self {
            path,
            width,
            height,
        })
    }
}

/// Width and height from the IHDR chunk, which must come first.
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    Some((width, height))
}
