// Helpers for building synthetic track backgrounds in tests.

pub mod image_helper {
    use image::{ImageEncoder, Rgba, RgbaImage};
    use std::path::Path;

    pub const GRASS: Rgba<u8> = Rgba([46, 139, 87, 255]);
    pub const ASPHALT: Rgba<u8> = Rgba([153, 153, 153, 255]);

    /// Writes an RGBA buffer as a PNG file.
    pub fn save(
        path: &Path,
        width: u32,
        height: u32,
        buffer: &[u8],
    ) -> Result<(), image::error::ImageError> {
        let output = std::fs::File::create(path)?;
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(buffer, width, height, image::ExtendedColorType::Rgba8)?;

        Ok(())
    }

    /// Grass background with an asphalt band spanning `left..=right` on each
    /// native row listed in `rows`.
    pub fn track_image(
        width: u32,
        height: u32,
        left: u32,
        right: u32,
        rows: &[u32],
    ) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if rows.contains(&y) && (left..=right).contains(&x) {
                ASPHALT
            } else {
                GRASS
            }
        })
    }

    pub fn save_image(path: &Path, image: &RgbaImage) -> Result<(), image::error::ImageError> {
        save(path, image.width(), image.height(), image.as_raw())
    }
}

#[cfg(test)]
mod tests {

    use super::image_helper::*;

    #[test]
    fn saved_track_decodes_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("background_band.png");
        let track = track_image(100, 300, 20, 80, &[299, 199, 99]);

        save_image(&path, &track).expect("Error Saving File.");

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (100, 300));
        assert_eq!(*decoded.get_pixel(20, 299), ASPHALT);
        assert_eq!(*decoded.get_pixel(19, 299), GRASS);
        assert_eq!(*decoded.get_pixel(50, 298), GRASS);
    }

    #[test]
    fn save_white_file() {
        let dir = tempfile::tempdir().unwrap();
        let height = 50u32;
        let width = 40u32;
        let buffer = vec![255u8; (width * height * 4) as usize];

        save(&dir.path().join("white_file.png"), width, height, &buffer)
            .expect("Error Saving File.");
    }
}
