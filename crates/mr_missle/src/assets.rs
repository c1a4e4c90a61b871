//! Game asset locations and loading

use std::path::Path;

use missle_engine::assets::ImageData;

/// Window icon, relative to the working directory
pub const ICON_PATH: &str = "sprites/Missle Man Assets/MissleManLogo.png";

/// Load the window icon
///
/// A missing or undecodable icon is not fatal: the error is logged and the
/// window is created without one.
pub fn load_icon(path: impl AsRef<Path>) -> Option<ImageData> {
    let path = path.as_ref();
    match ImageData::from_file(path) {
        Ok(icon) => Some(icon),
        Err(e) => {
            log::error!("Could not load window icon {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_icon_is_none() {
        assert!(load_icon("sprites/does-not-exist.png").is_none());
    }

    #[test]
    fn test_corrupt_icon_is_none() {
        let path = std::env::temp_dir().join(format!("mr_missle_{}_corrupt.png", std::process::id()));
        std::fs::write(&path, b"not a png").unwrap();
        let icon = load_icon(&path);
        std::fs::remove_file(&path).ok();
        assert!(icon.is_none());
    }

    #[test]
    fn test_valid_icon_loads() {
        let path = std::env::temp_dir().join(format!("mr_missle_{}_icon.png", std::process::id()));
        image::RgbaImage::from_pixel(4, 3, image::Rgba([200, 40, 40, 255]))
            .save(&path)
            .unwrap();

        let icon = load_icon(&path);
        std::fs::remove_file(&path).ok();

        let icon = icon.unwrap();
        assert_eq!((icon.width, icon.height), (4, 3));
        assert_eq!(&icon.data[..4], &[200, 40, 40, 255]);
    }
}
