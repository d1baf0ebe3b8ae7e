// Export the current surface as a PNG file or a one-page landscape A4 PDF.
// Both read the surface only; history is never touched.

use crate::error::{Error, Result};
use crate::surface::Surface;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};
use std::path::{Path, PathBuf};

/// A4 landscape in PDF points.
pub const A4_LANDSCAPE: (f32, f32) = (841.89, 595.28);

const FLATE_LEVEL: u8 = 6;

pub fn png_bytes(surface: &Surface) -> Result<Vec<u8>> {
    let (w, h) = surface.dimensions();
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&surface.to_rgb8(), w, h, ExtendedColorType::Rgb8)
        .map_err(|e| Error::Export(format!("png: {e}")))?;
    Ok(out)
}

/// Where the image lands on the page, in PDF user space (origin bottom-left).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fit the image to the page width, keep its aspect ratio and pin it to the
/// top-left corner. A tall image runs off the bottom of the page.
pub fn placement(surface_w: u32, surface_h: u32, page: (f32, f32)) -> Placement {
    let (page_w, page_h) = page;
    let width = page_w;
    let height = surface_h as f32 * width / surface_w as f32;
    Placement { x: 0.0, y: page_h - height, width, height }
}

/// One landscape A4 page holding the surface as a lossless RGB image.
pub fn pdf_bytes(surface: &Surface) -> Result<Vec<u8>> {
    let (w, h) = surface.dimensions();
    let width = i32::try_from(w).map_err(|_| Error::Export(format!("pdf image width {w}")))?;
    let height = i32::try_from(h).map_err(|_| Error::Export(format!("pdf image height {h}")))?;
    let pixels = compress_to_vec_zlib(&surface.to_rgb8(), FLATE_LEVEL);

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let content_id = Ref::new(4);
    let image_id = Ref::new(5);
    let image_name = Name(b"Im0");

    let (page_w, page_h) = A4_LANDSCAPE;
    let at = placement(w, h, A4_LANDSCAPE);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, page_w, page_h));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let mut image = pdf.image_xobject(image_id, &pixels);
    image.filter(Filter::FlateDecode);
    image.width(width);
    image.height(height);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([at.width, 0.0, 0.0, at.height, at.x, at.y]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    Ok(pdf.finish())
}

/// Write `bytes` to `dir/name`, creating `dir` if needed.
pub fn save_to(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}
