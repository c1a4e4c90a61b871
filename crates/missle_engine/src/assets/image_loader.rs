//! Image loading utilities
//!
//! Decodes PNG files into tightly packed RGBA8 pixels, ready to be handed to
//! the window system (icons) or blitted into a framebuffer.

use std::path::Path;
use crate::assets::AssetError;

/// Loaded image data
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data, row-major, top row first
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image: {}", e)))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self {
            data,
            width,
            height,
        }
    }

    /// Pack pixels into one `u32` per pixel whose in-memory byte order is
    /// R, G, B, A (the layout glfw expects for window icons)
    pub fn packed_pixels(&self) -> Vec<u32> {
        self.data
            .chunks_exact(4)
            .map(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]]))
            .collect()
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4);
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_packed_pixels_keep_byte_order() {
        let img = ImageData::solid_color(2, 1, [10, 20, 30, 40]);
        let packed = img.packed_pixels();
        assert_eq!(packed.len(), 2);
        assert_eq!(packed[0].to_ne_bytes(), [10, 20, 30, 40]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ImageData::from_file("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn test_garbage_file_fails_to_decode() {
        let path = std::env::temp_dir().join(format!("missle_engine_{}_garbage.png", std::process::id()));
        std::fs::write(&path, b"not a png").unwrap();

        let err = ImageData::from_file(&path).unwrap_err();
        assert!(matches!(err, AssetError::LoadFailed(_)));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_png_round_trip_from_disk() {
        let path = std::env::temp_dir().join(format!("missle_engine_{}_icon.png", std::process::id()));
        image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let img = ImageData::from_file(&path).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(&img.data[0..4], &[1, 2, 3, 255]);
        std::fs::remove_file(&path).ok();
    }
}
