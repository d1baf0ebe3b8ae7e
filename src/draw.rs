// Window + software drawing utilities.
// What ends up on screen each frame:
// 1) A toolbar strip along the top: current color swatch and a status line.
// 2) The drawing surface right below it.
// 3) A crosshair that follows the mouse over the surface.

use crate::canvas::Canvas;
use crate::error::Error;
use crate::surface::Surface;
use crate::types::{Color, Point};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Height of the toolbar strip above the surface, in pixels.
pub const TOOLBAR_HEIGHT: usize = 16;

const TOOLBAR_BG: Color = Color(0x00_30_30_30);
const TOOLBAR_FG: Color = Color(0x00_FF_FF_FF);
const CROSSHAIR: Color = Color(0x00_FF_CC_33);

/// The composed window image.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0; width * height] }
    }
}

pub struct Drawer {
    window: Window,
}

impl Drawer {
    /// Open a window of the given size.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, `None` once it leaves the window.
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Point::new(x, y))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// True on the frame a key goes down; holding it does not repeat.
    pub fn pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }
}

/// Is `p` (viewport space) over the surface?
pub fn over_surface(surface: &Surface, p: Point) -> bool {
    let local = surface.to_local(p);
    local.x >= 0.0 && local.y >= 0.0 && local.x < surface.width as f32 && local.y < surface.height as f32
}

/// Build this frame's window image from the canvas state.
pub fn compose(screen: &mut FrameBuffer, canvas: &Canvas, mouse: Option<Point>) {
    let surface = canvas.surface();
    let origin = surface.origin();
    let (ox, oy) = (origin.x as usize, origin.y as usize);

    screen.pixels.fill(TOOLBAR_BG.0);

    // Surface, row by row at its origin.
    for y in 0..surface.height.min(screen.height.saturating_sub(oy)) {
        let src = &surface.pixels[y * surface.width..(y + 1) * surface.width];
        let w = surface.width.min(screen.width.saturating_sub(ox));
        let dst = (y + oy) * screen.width + ox;
        screen.pixels[dst..dst + w].copy_from_slice(&src[..w]);
    }

    // Toolbar: swatch of the active paint color, then the status line.
    let tools = canvas.tools();
    let swatch = tools.brush(surface.background()).color;
    fill_rect(screen, 4, 3, 10, 10, TOOLBAR_FG);
    fill_rect(screen, 5, 4, 8, 8, swatch);
    draw_text_5x7(screen, 20, 4, &status_line(canvas), TOOLBAR_FG);

    if let Some(m) = mouse.filter(|&m| over_surface(surface, m)) {
        draw_crosshair(screen, m.x as i32, m.y as i32, 6, CROSSHAIR);
    }
}

/// e.g. `PENCIL 5 | ROUND ROUND | 3/7`, with ` | BUSY` while a restore runs.
pub fn status_line(canvas: &Canvas) -> String {
    let tools = canvas.tools();
    let step = canvas.step().map_or(0, |s| s + 1);
    let mut line = format!(
        "{} {} | {} {} | {}/{}",
        tools.tool.label(),
        tools.width().round() as u32,
        tools.cap.label(),
        tools.join.label(),
        step,
        canvas.history_len()
    );
    if canvas.is_restoring() {
        line.push_str(" | BUSY");
    }
    line
}

/* ---------- Software drawing: pixels, rectangles, crosshair, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    fb.pixels[y * fb.width + x] = color.0;
}

fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: Color) {
    for yy in y..y + h {
        for xx in x..x + w {
            put_pixel(fb, xx, yy, color);
        }
    }
}

/// Axis-aligned 1-pixel line.
fn draw_hline(fb: &mut FrameBuffer, x0: i32, x1: i32, y: i32, color: Color) {
    for x in x0.min(x1)..=x0.max(x1) {
        put_pixel(fb, x, y, color);
    }
}

fn draw_vline(fb: &mut FrameBuffer, x: i32, y0: i32, y1: i32, color: Color) {
    for y in y0.min(y1)..=y0.max(y1) {
        put_pixel(fb, x, y, color);
    }
}

/// A "+" with a small gap at the center, so the pixel under the pointer stays visible.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: Color) {
    draw_hline(fb, cx - size, cx - 2, cy, color);
    draw_hline(fb, cx + 2, cx + size, cy, color);
    draw_vline(fb, cx, cy - size, cy - 2, color);
    draw_vline(fb, cx, cy + 2, cy + size, color);
}

/* ---------- 5x7 bitmap font: digits, A-Z and a little punctuation ---------- */

/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
/// Lowercase letters render as uppercase.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// One glyph with a 1-pixel black shadow for contrast. Unknown characters are skipped.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: Color) {
    let Some(rows) = glyph5x7(ch) else {
        return;
    };
    for (offset, c) in [(1, Color::BLACK), (0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx + offset, y + ry as i32 + offset, c);
                }
            }
        }
    }
}

/// Draw a string; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: Color) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Action;
    use crate::config::Config;

    fn canvas() -> Canvas {
        let cfg = Config { width: 200, height: 40, ..Config::default() };
        Canvas::new(&cfg)
            .unwrap()
            .with_origin(Point::new(0.0, TOOLBAR_HEIGHT as f32))
    }

    #[test]
    fn every_status_character_has_a_glyph() {
        let c = canvas();
        for ch in status_line(&c).chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?}");
        }
        for label in ["ERASER", "BUTT", "SQUARE", "BEVEL", "MITER", "BUSY"] {
            assert!(label.chars().all(|ch| glyph5x7(ch).is_some()), "{label}");
        }
    }

    #[test]
    fn status_line_reports_tool_and_history() {
        let mut c = canvas();
        assert_eq!(status_line(&c), "PENCIL 5 | ROUND ROUND | 1/1");
        c.dispatch(Action::PointerDown(Point::new(5.0, 20.0))).unwrap();
        c.dispatch(Action::PointerUp(Point::new(5.0, 20.0))).unwrap();
        assert!(status_line(&c).ends_with("2/2"));
    }

    #[test]
    fn compose_places_surface_below_toolbar() {
        let mut c = canvas();
        // pointer at viewport (50, 26) is surface pixel (50, 10)
        c.dispatch(Action::PointerDown(Point::new(50.0, 26.0))).unwrap();
        let mut screen = FrameBuffer::new(200, 40 + TOOLBAR_HEIGHT);
        compose(&mut screen, &c, None);

        assert_eq!(c.surface().get(50, 10), Some(Color::BLACK));
        assert_eq!(screen.pixels[26 * 200 + 50], Color::BLACK.0);
        assert_eq!(screen.pixels[(TOOLBAR_HEIGHT + 30) * 200 + 150], Color::WHITE.0);
        assert_eq!(screen.pixels[200 - 1], TOOLBAR_BG.0);
    }

    #[test]
    fn crosshair_only_over_surface() {
        let c = canvas();
        assert!(over_surface(c.surface(), Point::new(10.0, 20.0)));
        assert!(!over_surface(c.surface(), Point::new(10.0, 5.0)));

        let mut screen = FrameBuffer::new(200, 40 + TOOLBAR_HEIGHT);
        compose(&mut screen, &c, Some(Point::new(100.0, 30.0)));
        assert_eq!(screen.pixels[30 * 200 + 100 + 4], CROSSHAIR.0);
        // gap at the center
        assert_eq!(screen.pixels[30 * 200 + 100], Color::WHITE.0);
    }
}
