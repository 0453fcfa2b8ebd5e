//! Single-page check PDF assembly.

use crate::raster::RasterImage;
use crate::{RenderError, RenderResult};
use lopdf::{Document, Object, Stream, dictionary};

/// Check page width in points, 8.5in.
pub const CHECK_PAGE_WIDTH_PT: i64 = 612;
/// Check page height in points, 3.5in.
pub const CHECK_PAGE_HEIGHT_PT: i64 = 252;

const IMAGE_NAME: &str = "Im0";

/// Build a one-page PDF with `image` stretched over a 612×252 pt page.
pub fn build_check_pdf(image: &RasterImage) -> RenderResult<Vec<u8>> {
    let expected = image.width as usize * image.height as usize * 3;
    if image.width == 0 || image.height == 0 || image.rgb.len() != expected {
        return Err(RenderError::Pdf(format!(
            "bad image: {}x{} with {} bytes",
            image.width,
            image.height,
            image.rgb.len()
        )));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width as i64,
            "Height" => image.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        image.rgb.clone(),
    );
    let image_id = doc.add_object(image_stream);

    let content = format!("q {CHECK_PAGE_WIDTH_PT} 0 0 {CHECK_PAGE_HEIGHT_PT} 0 0 cm /{IMAGE_NAME} Do Q");
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(CHECK_PAGE_WIDTH_PT),
            Object::Integer(CHECK_PAGE_HEIGHT_PT),
        ],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { IMAGE_NAME => image_id },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal("CheckForge"),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32) -> RasterImage {
        RasterImage {
            width,
            height,
            rgb: vec![255; (width * height * 3) as usize],
        }
    }

    #[test]
    fn test_single_page_with_check_media_box() {
        let bytes = build_check_pdf(&image(8, 4)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);

        let page_id = pages[&1];
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box: Vec<i64> = page
            .get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_i64().unwrap())
            .collect();
        assert_eq!(media_box, vec![0, 0, 612, 252]);
    }

    #[test]
    fn test_rejects_mismatched_buffer() {
        let mut bad = image(4, 4);
        bad.rgb.pop();
        assert!(matches!(build_check_pdf(&bad), Err(RenderError::Pdf(_))));
        assert!(matches!(build_check_pdf(&image(0, 4)), Err(RenderError::Pdf(_))));
    }
}
