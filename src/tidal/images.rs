//! Playlist cover URL resolution.
//!
//! A playlist carries up to two picture UUIDs: `squareImage` and the wide
//! `image`. Only a fixed set of sizes is served for each shape.

use crate::{Res, tidal::TidalApi, types::Playlist};

pub const SQUARE_DIMENSIONS: [u32; 6] = [160, 320, 480, 640, 750, 1080];
pub const WIDE_WIDTHS: [u32; 4] = [160, 480, 750, 1080];
pub const WIDE_HEIGHTS: [u32; 4] = [107, 320, 500, 720];

pub const WIDE_DEFAULT: (u32, u32) = (1080, 720);

/// Square cover at `dimensions`, falling back to the wide picture at its
/// default size when the playlist has no square picture.
pub fn image<A: TidalApi + ?Sized>(api: &A, playlist: &Playlist, dimensions: u32) -> Res<String> {
    if !SQUARE_DIMENSIONS.contains(&dimensions) {
        return Err(format!("Invalid image dimensions {}", dimensions).into());
    }

    if let Some(square) = &playlist.square_image {
        return Ok(api.image_url(square, dimensions, dimensions));
    }

    let (width, height) = WIDE_DEFAULT;
    wide_image(api, playlist, width, height)
}

/// Wide cover at `width` x `height`.
pub fn wide_image<A: TidalApi + ?Sized>(
    api: &A,
    playlist: &Playlist,
    width: u32,
    height: u32,
) -> Res<String> {
    if !WIDE_WIDTHS.contains(&width) || !WIDE_HEIGHTS.contains(&height) {
        return Err(format!("Invalid wide image dimensions {}x{}", width, height).into());
    }

    match &playlist.image {
        Some(picture) => Ok(api.image_url(picture, width, height)),
        None => Err(format!("Playlist {} has no wide picture", playlist.uuid).into()),
    }
}
