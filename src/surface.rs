// The raster surface the user draws on, and its snapshot encoding.
// Pixels are 0x00RRGGBB so the buffer can be pushed to the window unchanged.

use crate::error::{Error, Result};
use crate::types::{Color, Point};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Surface {
    pub width: usize,     // fixed at creation
    pub height: usize,    // fixed at creation
    pub pixels: Vec<u32>, // row-major, len = width * height
    background: Color,
    /// Top-left corner of the surface in viewport space.
    origin: Point,
}

impl Surface {
    /// A surface filled with `background`.
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![background.0; width * height],
            background,
            origin: Point::default(),
        }
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Viewport coordinates to surface coordinates. 1:1, no DPI scaling.
    pub fn to_local(&self, viewport: Point) -> Point {
        viewport - self.origin
    }

    /// Paint every pixel with the background color.
    pub fn fill_background(&mut self) {
        self.pixels.fill(self.background.0);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Color(self.pixels[y * self.width + x]))
    }

    /// Put a pixel if (x,y) is inside bounds; silently clipped otherwise.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color.0;
    }

    /// Tightly packed RGB8 bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for &px in &self.pixels {
            let c = Color(px);
            out.extend_from_slice(&[c.r(), c.g(), c.b()]);
        }
        out
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    /// Capture the whole surface as a lossless snapshot.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let (w, h) = self.dimensions();
        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(&self.to_rgb8(), w, h, ExtendedColorType::Rgb8)
            .map_err(Error::SnapshotEncode)?;
        Ok(Snapshot { width: w, height: h, png: png.into() })
    }

    /// Replace the whole surface with already-decoded snapshot pixels.
    /// The size is checked first so a mismatched buffer never lands half-painted.
    pub fn restore(&mut self, pixels: Vec<u32>) -> Result<()> {
        if pixels.len() != self.pixels.len() {
            return Err(Error::PixelCount { expected: self.pixels.len(), found: pixels.len() });
        }
        self.pixels = pixels;
        Ok(())
    }
}

/// An immutable, self-contained PNG encoding of a whole surface.
/// Cloning shares the bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    png: Arc<[u8]>,
}

impl Snapshot {
    /// Wrap raw PNG bytes, e.g. ones read back from disk.
    pub fn from_png(width: u32, height: u32, png: Vec<u8>) -> Self {
        Self { width, height, png: png.into() }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Decode back to 0x00RRGGBB pixels. Fails on corrupt bytes or if the
    /// encoded image does not match the recorded dimensions.
    pub fn decode(&self) -> Result<Vec<u32>> {
        let img = image::load_from_memory_with_format(&self.png, ImageFormat::Png)
            .map_err(Error::SnapshotDecode)?
            .to_rgb8();
        if (img.width(), img.height()) != (self.width, self.height) {
            return Err(Error::SnapshotSize {
                expected: (self.width, self.height),
                found: (img.width(), img.height()),
            });
        }
        Ok(img
            .pixels()
            .map(|p| Color::rgb(p.0[0], p.0[1], p.0[2]).0)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_uniform_background() {
        let s = Surface::new(4, 3, Color::WHITE);
        assert_eq!(s.pixels.len(), 12);
        assert!(s.pixels.iter().all(|&p| p == Color::WHITE.0));
    }

    #[test]
    fn to_local_subtracts_origin_without_scaling() {
        let s = Surface::new(10, 10, Color::WHITE).with_origin(Point::new(5.0, 20.0));
        assert_eq!(s.to_local(Point::new(12.5, 21.0)), Point::new(7.5, 1.0));
    }

    #[test]
    fn put_pixel_clips_out_of_bounds() {
        let mut s = Surface::new(2, 2, Color::WHITE);
        s.put_pixel(-1, 0, Color::BLACK);
        s.put_pixel(2, 1, Color::BLACK);
        s.put_pixel(1, 1, Color::BLACK);
        assert_eq!(s.get(1, 1), Some(Color::BLACK));
        assert_eq!(s.pixels.iter().filter(|&&p| p == Color::BLACK.0).count(), 1);
    }

    #[test]
    fn snapshot_decodes_to_identical_pixels() {
        let mut s = Surface::new(16, 9, Color::WHITE);
        s.put_pixel(3, 4, Color::rgb(12, 200, 7));
        s.put_pixel(15, 8, Color::rgb(1, 2, 3));
        let snap = s.snapshot().unwrap();
        assert_eq!(snap.dimensions(), (16, 9));
        assert!(snap.as_bytes().starts_with(b"\x89PNG\r\n\x1a\n"));
        assert_eq!(snap.decode().unwrap(), s.pixels);
    }

    #[test]
    fn corrupt_snapshot_fails_to_decode() {
        let snap = Snapshot::from_png(4, 4, b"not a png".to_vec());
        assert!(matches!(snap.decode(), Err(Error::SnapshotDecode(_))));
    }

    #[test]
    fn restore_rejects_wrong_length_and_keeps_pixels() {
        let mut s = Surface::new(2, 2, Color::WHITE);
        assert!(s.restore(vec![0; 3]).is_err());
        assert!(s.pixels.iter().all(|&p| p == Color::WHITE.0));
    }
}
