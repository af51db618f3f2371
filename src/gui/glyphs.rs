use crate::gui::display::Glyph;

use anyhow::{Context, Result};
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use log::{info, warn};

use std::path::Path;

/// Textures for everything drawn on the stopwatch screen. A missing texture is rendered with a
/// text fallback instead.
pub(crate) struct GlyphSet {
    digits: [Option<TextureHandle>; 10],
    colon: Option<TextureHandle>,
    pub(crate) play: Option<TextureHandle>,
    pub(crate) pause: Option<TextureHandle>,
    pub(crate) reset: Option<TextureHandle>,
    pub(crate) background: Option<TextureHandle>,
    pub(crate) title: Option<TextureHandle>,
}

impl GlyphSet {
    pub(crate) fn load(ctx: &egui::Context, dir: &Path) -> GlyphSet {
        info!("Loading glyphs from {}", dir.display());

        GlyphSet {
            digits: std::array::from_fn(|i| load_texture(ctx, dir, &format!("num_{i}"))),
            colon: load_texture(ctx, dir, "num_colon"),
            play: load_texture(ctx, dir, "play_button"),
            pause: load_texture(ctx, dir, "pause_button"),
            reset: load_texture(ctx, dir, "reset_button"),
            background: load_texture(ctx, dir, "background"),
            title: load_texture(ctx, dir, "title_image"),
        }
    }

    pub(crate) fn glyph(&self, glyph: Glyph) -> Option<&TextureHandle> {
        match glyph {
            Glyph::Digit(v) => self.digits.get(v as usize)?.as_ref(),
            Glyph::Colon => self.colon.as_ref(),
        }
    }
}

fn load_texture(ctx: &egui::Context, dir: &Path, name: &str) -> Option<TextureHandle> {
    let path = dir.join(format!("{name}.png"));
    match load_color_image(&path) {
        Ok(image) => Some(ctx.load_texture(name, image, TextureOptions::LINEAR)),
        Err(e) => {
            warn!("Using fallback for {}: {:?}", name, e);
            None
        }
    }
}

fn load_color_image(path: &Path) -> Result<ColorImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgba8();

    let size = [image.width() as usize, image.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

#[cfg(test)]
mod test {
    use super::*;

    use std::fs;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> Result<()> {
        image::RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]))
            .save(dir.join(format!("{name}.png")))?;
        Ok(())
    }

    #[test]
    fn decode_png() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_png(dir.path(), "num_7", 4, 8)?;

        let image = load_color_image(&dir.path().join("num_7.png"))?;
        assert_eq!(image.size, [4, 8]);
        assert_eq!(image.pixels.len(), 32);
        Ok(())
    }

    #[test]
    fn missing_and_corrupt_files_fall_back() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_png(dir.path(), "num_3", 2, 2)?;
        write_png(dir.path(), "pause_button", 3, 3)?;
        fs::write(dir.path().join("num_colon.png"), b"not a png")?;

        let ctx = egui::Context::default();
        let glyphs = GlyphSet::load(&ctx, dir.path());

        let three = glyphs.glyph(Glyph::Digit(3)).expect("num_3 should load");
        assert_eq!(three.size(), [2, 2]);
        assert!(glyphs.glyph(Glyph::Digit(4)).is_none());
        assert!(glyphs.glyph(Glyph::Colon).is_none());
        assert!(glyphs.pause.is_some());
        assert!(glyphs.play.is_none());
        assert!(glyphs.background.is_none());
        Ok(())
    }

    #[test]
    fn out_of_range_digit_has_no_glyph() {
        let ctx = egui::Context::default();
        let dir = tempfile::tempdir().unwrap();
        let glyphs = GlyphSet::load(&ctx, dir.path());
        assert!(glyphs.glyph(Glyph::Digit(10)).is_none());
    }
}
