/// Remote image loader
///
/// Downloads an image variant, checks that it decodes, and hands it to
/// iced as an image handle. Used for background tiers, feature images and
/// subscription icons alike.
use iced::widget::image::Handle;
use image::ImageReader;
use std::io::Cursor;

use crate::error::AssetLoadFailure;

/// Fetch `url` and return a displayable handle.
///
/// Non-2xx answers and bodies that are not a known image format are
/// failures; there is no retry.
pub async fn fetch_image(client: reqwest::Client, url: String) -> Result<Handle, AssetLoadFailure> {
    let response = client.get(&url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;

    // iced decodes the pixels itself, only the header is read here
    let (width, height) = decode_dimensions(&bytes)?;
    log::debug!("📥 {}x{} image ({} KB) from {}", width, height, bytes.len() / 1024, url);

    Ok(Handle::from_bytes(bytes))
}

/// Read the image header in `bytes` and return its dimensions
pub fn decode_dimensions(bytes: &[u8]) -> Result<(u32, u32), AssetLoadFailure> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AssetLoadFailure::Decode(e.to_string()))?;
    Ok(reader.into_dimensions()?)
}
