// Start-up settings for a drawing session. Nothing here is persisted.

use crate::error::{Error, Result};
use crate::tool::{LineCap, LineJoin};
use crate::types::Color;
use std::num::NonZeroUsize;
use std::path::PathBuf;

pub const PNG_FILENAME: &str = "my-drawing.png";
pub const PDF_FILENAME: &str = "my-drawing.pdf";

#[derive(Clone, Debug)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub color: Color,
    pub pencil_width: f32,
    pub eraser_width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    /// Oldest snapshots are evicted past this count. `None` keeps everything.
    pub history_limit: Option<NonZeroUsize>,
    pub out_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color::WHITE,
            color: Color::BLACK,
            pencil_width: 5.0,
            eraser_width: 5.0,
            cap: LineCap::Round,
            join: LineJoin::Round,
            history_limit: None,
            out_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "surface must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        for (name, w) in [("pencil", self.pencil_width), ("eraser", self.eraser_width)] {
            if !(w.is_finite() && w > 0.0) {
                return Err(Error::InvalidConfig(format!("{name} width must be positive, got {w}")));
            }
        }
        Ok(())
    }
}
