use std::path::Path;

use glium::{
    texture::{MipmapsOption, RawImage2d, SrgbTexture2d},
    Display,
};
use glutin::surface::WindowSurface;
use image::RgbaImage;

use crate::error::AppError;

/// Decodes any format `image` understands into RGBA8, so 3- and 4-channel sources upload the
/// same way.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, AppError> {
    std::fs::read(path)
        .map_err(image::ImageError::IoError)
        .and_then(|bytes| decode_rgba(&bytes))
        .map_err(|source| AppError::TextureLoad {
            path: path.to_path_buf(),
            source,
        })
}

pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, image::ImageError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Uploads with rows reversed: image rows start at the top, GL texture rows at the bottom.
pub fn upload(
    display: &Display<WindowSurface>,
    image: RgbaImage,
) -> Result<SrgbTexture2d, AppError> {
    let dimensions = image.dimensions();
    let raw = RawImage2d::from_raw_rgba_reversed(&image.into_raw(), dimensions);
    Ok(SrgbTexture2d::with_mipmaps(
        display,
        raw,
        MipmapsOption::AutoGeneratedMipmaps,
    )?)
}

pub fn load(display: &Display<WindowSurface>, path: &Path) -> Result<SrgbTexture2d, AppError> {
    let image = load_rgba(path)?;
    log::info!(
        "loaded texture {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    upload(display, image)
}
