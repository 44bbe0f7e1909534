//! Texture loading and sampler state
//!
//! The ground plane's checker texture is the only image asset. Loading failures are
//! not fatal: `TextureLoader::load` logs a warning and hands back an empty texture,
//! which renders as untextured material color.

use std::path::Path;

use thiserror::Error;

use crate::foundation::math::Vec2;

/// Texture loading errors
#[derive(Error, Debug)]
pub enum TextureError {
    /// The image file could not be opened or decoded
    #[error("Failed to load image {path}: {source}")]
    LoadFailed {
        /// Path that was attempted
        path: String,
        /// Decoder error
        #[source]
        source: image::ImageError,
    },
}

/// Decoded RGBA8 pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data, row-major from the top-left
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path_ref = path.as_ref();
        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref).map_err(|source| TextureError::LoadFailed {
            path: path_ref.display().to_string(),
            source,
        })?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();
        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }
}

/// How texture coordinates outside [0, 1] are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Clamp to the edge texel
    ClampToEdge,
    /// Tile the texture
    Repeat,
}

/// Magnification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest texel, keeps checker edges crisp
    Nearest,
    /// Bilinear blend of neighbouring texels
    Linear,
}

/// Texture with sampler state
#[derive(Debug, Clone)]
pub struct Texture {
    /// Pixel data; `None` when loading failed
    pub image: Option<ImageData>,
    /// Horizontal wrap mode
    pub wrap_s: WrapMode,
    /// Vertical wrap mode
    pub wrap_t: WrapMode,
    /// Magnification filter
    pub mag_filter: FilterMode,
    /// Number of tiles across the surface in U and V
    pub repeat: Vec2,
}

impl Texture {
    /// Wrap an image with default sampler state (clamped, linear, no repeat)
    pub fn new(image: Option<ImageData>) -> Self {
        Self {
            image,
            wrap_s: WrapMode::ClampToEdge,
            wrap_t: WrapMode::ClampToEdge,
            mag_filter: FilterMode::Linear,
            repeat: Vec2::new(1.0, 1.0),
        }
    }

    /// Whether pixel data is available
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }
}

/// Loads textures, degrading to an empty texture on failure
pub struct TextureLoader;

impl TextureLoader {
    /// Load `path`, logging and returning an empty texture if it cannot be read
    pub fn load<P: AsRef<Path>>(path: P) -> Texture {
        match ImageData::from_file(&path) {
            Ok(image) => Texture::new(Some(image)),
            Err(e) => {
                log::warn!("{}; rendering untextured", e);
                Texture::new(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_degrades_to_untextured() {
        let texture = TextureLoader::load("no/such/dir/checker.png");
        assert!(!texture.is_loaded());
        assert_eq!(texture.wrap_s, WrapMode::ClampToEdge);
    }

    #[test]
    fn test_default_sampler_state() {
        let texture = Texture::new(None);
        assert_eq!(texture.wrap_s, WrapMode::ClampToEdge);
        assert_eq!(texture.wrap_t, WrapMode::ClampToEdge);
        assert_eq!(texture.mag_filter, FilterMode::Linear);
        assert_eq!(texture.repeat, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_png_loads_as_rgba() {
        let path = std::env::temp_dir().join("light_engine_checker_2x2.png");
        let checker = image::RgbaImage::from_fn(2, 2, |x, y| {
            let shade = if (x + y) % 2 == 0 { 0xC0 } else { 0x80 };
            image::Rgba([shade, shade, shade, 0xFF])
        });
        checker.save(&path).unwrap();

        let texture = TextureLoader::load(&path);
        let image = texture.image.as_ref().unwrap();
        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.data.len(), 16);
        assert_eq!(&image.data[0..4], &[0xC0, 0xC0, 0xC0, 0xFF]);
        assert_eq!(&image.data[4..8], &[0x80, 0x80, 0x80, 0xFF]);

        std::fs::remove_file(&path).ok();
    }
}
