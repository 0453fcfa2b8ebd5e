//! SVG rasterization.

use crate::{RenderError, RenderResult};
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg::{self, fontdb};
use std::sync::Arc;

/// An opaque RGB bitmap, rows top to bottom, three bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

/// Turns an SVG document into pixels.
pub trait Rasterizer {
    /// Rasterize `svg` at `scale` device pixels per SVG unit.
    fn rasterize(&self, svg: &str, scale: f32) -> RenderResult<RasterImage>;
}

/// Rasterizer backed by resvg.
#[derive(Clone)]
pub struct ResvgRasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl ResvgRasterizer {
    /// Rasterizer using the fonts installed on the system.
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} system font faces", db.len());
        Self::with_fonts(db)
    }

    /// Rasterizer using exactly the fonts in `db`. Text is skipped when no
    /// face matches.
    pub fn with_fonts(db: fontdb::Database) -> Self {
        Self {
            fontdb: Arc::new(db),
        }
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &str, scale: f32) -> RenderResult<RasterImage> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(RenderError::Raster(format!("invalid scale {scale}")));
        }

        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(svg, &options).map_err(|e| RenderError::Svg(e.to_string()))?;

        let size = tree.size();
        let width = (size.width() * scale).ceil() as u32;
        let height = (size.height() * scale).ceil() as u32;
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| RenderError::Raster(format!("cannot allocate {width}x{height} pixmap")))?;
        pixmap.fill(Color::WHITE);

        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        let rgb = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue()]
            })
            .collect();

        Ok(RasterImage { width, height, rgb })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rasterizer() -> ResvgRasterizer {
        ResvgRasterizer::with_fonts(fontdb::Database::new())
    }

    #[test]
    fn test_scale_and_fill() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="4">
            <rect x="0" y="0" width="5" height="4" fill="black"/>
        </svg>"#;
        let image = rasterizer().rasterize(svg, 2.0).unwrap();
        assert_eq!((image.width, image.height), (20, 8));
        assert_eq!(image.rgb.len(), 20 * 8 * 3);
        // Left half black, right half white background.
        assert_eq!(&image.rgb[0..3], &[0, 0, 0]);
        let last = image.rgb.len() - 3;
        assert_eq!(&image.rgb[last..], &[255, 255, 255]);
    }

    #[test]
    fn test_invalid_svg() {
        assert!(matches!(
            rasterizer().rasterize("not svg", 1.0),
            Err(RenderError::Svg(_))
        ));
    }

    #[test]
    fn test_invalid_scale() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#;
        assert!(matches!(
            rasterizer().rasterize(svg, 0.0),
            Err(RenderError::Raster(_))
        ));
    }
}
