// SPDX-License-Identifier: GPL-3.0-only

use anywho::{Error, anywho};
use image::imageops::FilterType;

use crate::entities::SpriteImage;

/// Decodes a downloaded sprite (png, jpeg, gif or webp) and resizes it to a `size`x`size` RGBA bitmap.
///
/// Sprites are pixel art, so the resize uses nearest neighbour to keep them crisp.
pub fn decode_sprite(bytes: &[u8], size: u32) -> Result<SpriteImage, Error> {
    if size == 0 {
        return Err(anywho!("Invalid sprite size: {size}"));
    }

    let image = image::load_from_memory(bytes)?
        .resize_exact(size, size, FilterType::Nearest)
        .to_rgba8();

    Ok(SpriteImage {
        width: image.width(),
        height: image.height(),
        pixels: image.into_raw(),
    })
}
