//! Default avatar generation.
//!
//! Organizations and bootstrap accounts created without an image get a
//! deterministic identicon: a horizontally symmetric block pattern derived
//! from the SHA-256 of the name, rendered as an inline SVG data URI. The
//! registry core only ever records the file reference returned by
//! [`save_image`].

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{NodeError, Result};

/// Default identicon edge length in pixels.
pub const DEFAULT_SIZE: u32 = 128;
/// Default block edge length in pixels.
pub const DEFAULT_BLOCK: u32 = 16;

/// Generate an identicon for a seed string as a `data:image/svg+xml` URI.
///
/// The left half of the grid is filled wherever the corresponding hex digit
/// of the seed's SHA-256 is even, then mirrored. The fill color is taken
/// from the first six hex digits. Deterministic: the same seed always
/// produces the same image.
pub fn generate_identicon(seed: &str, size: u32, block: u32) -> String {
    let digest = hex::encode(Sha256::digest(seed.as_bytes()));
    let digits: Vec<u8> = digest
        .bytes()
        .map(|b| match b {
            b'0'..=b'9' => b - b'0',
            _ => b - b'a' + 10,
        })
        .collect();
    let color = &digest[..6];
    let blocks = (size / block) as usize;

    let mut rects = String::new();
    for y in 0..blocks {
        for x in 0..blocks / 2 {
            if digits[(x + y * blocks) % digits.len()] % 2 == 0 {
                let px = x as u32 * block;
                let py = y as u32 * block;
                let mx = (blocks - x - 1) as u32 * block;
                rects.push_str(&format!(
                    r##"<rect x="{px}" y="{py}" width="{block}" height="{block}" fill="#{color}"/>"##
                ));
                rects.push_str(&format!(
                    r##"<rect x="{mx}" y="{py}" width="{block}" height="{block}" fill="#{color}"/>"##
                ));
            }
        }
    }

    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}"><rect width="{size}" height="{size}" fill="#ffffff"/>{rects}</svg>"##
    );
    format!("data:image/svg+xml;base64,{}", BASE64.encode(svg))
}

/// Decode an inline image and store it under `dir`, returning the path.
///
/// Accepts any `data:image/<format>;base64,` URI; the file extension is the
/// format's first segment (so `svg+xml` is stored as `.svg`).
pub fn save_image(inline_image: &str, stem: &str, dir: &Path) -> Result<PathBuf> {
    let (header, payload) = inline_image
        .split_once(',')
        .ok_or_else(|| NodeError::InvalidImage("missing data URI separator".to_string()))?;
    let format = header
        .strip_prefix("data:image/")
        .and_then(|rest| rest.strip_suffix(";base64"))
        .ok_or_else(|| NodeError::InvalidImage(format!("unsupported image header: {}", header)))?;
    let extension = format.split('+').next().unwrap_or(format);

    let bytes = BASE64
        .decode(payload)
        .map_err(|e| NodeError::InvalidImage(e.to_string()))?;

    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.{}", stem, extension));
    fs::write(&path, bytes)?;
    Ok(path)
}
