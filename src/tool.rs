// Tool configuration: which tool is active and how it paints.
// Changing any of this is not undoable; only pixels are.

use crate::config::Config;
use crate::types::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Pencil,
    Eraser,
}

impl ToolKind {
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Pencil => "PENCIL",
            ToolKind::Eraser => "ERASER",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Round,
    Butt,
    Square,
}

impl LineCap {
    pub fn label(self) -> &'static str {
        match self {
            LineCap::Round => "ROUND",
            LineCap::Butt => "BUTT",
            LineCap::Square => "SQUARE",
        }
    }

    pub fn all() -> &'static [LineCap] {
        &[LineCap::Round, LineCap::Butt, LineCap::Square]
    }

    pub fn next(self) -> Self {
        match self {
            LineCap::Round => LineCap::Butt,
            LineCap::Butt => LineCap::Square,
            LineCap::Square => LineCap::Round,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Round,
    Bevel,
    Miter,
}

impl LineJoin {
    pub fn label(self) -> &'static str {
        match self {
            LineJoin::Round => "ROUND",
            LineJoin::Bevel => "BEVEL",
            LineJoin::Miter => "MITER",
        }
    }

    pub fn all() -> &'static [LineJoin] {
        &[LineJoin::Round, LineJoin::Bevel, LineJoin::Miter]
    }

    pub fn next(self) -> Self {
        match self {
            LineJoin::Round => LineJoin::Bevel,
            LineJoin::Bevel => LineJoin::Miter,
            LineJoin::Miter => LineJoin::Round,
        }
    }
}

/// The fully resolved paint parameters for one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub color: Color,
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
}

/// Active tool plus per-tool settings. Each tool remembers its own width, so
/// switching between pencil and eraser restores the width last used for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolConfig {
    pub tool: ToolKind,
    pub color: Color,
    pub pencil_width: f32,
    pub eraser_width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ToolConfig {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            tool: ToolKind::Pencil,
            color: cfg.color,
            pencil_width: cfg.pencil_width,
            eraser_width: cfg.eraser_width,
            cap: cfg.cap,
            join: cfg.join,
        }
    }

    /// Width of the active tool.
    pub fn width(&self) -> f32 {
        match self.tool {
            ToolKind::Pencil => self.pencil_width,
            ToolKind::Eraser => self.eraser_width,
        }
    }

    /// Sets the width of the active tool only. Non-positive or NaN widths are ignored.
    pub fn set_width(&mut self, width: f32) {
        if !(width.is_finite() && width > 0.0) {
            log::debug!("ignoring stroke width {width}");
            return;
        }
        match self.tool {
            ToolKind::Pencil => self.pencil_width = width,
            ToolKind::Eraser => self.eraser_width = width,
        }
    }

    /// Resolve the brush for the next segment. The eraser always paints the
    /// surface background, whatever color is selected.
    pub fn brush(&self, background: Color) -> Brush {
        let color = match self.tool {
            ToolKind::Pencil => self.color,
            ToolKind::Eraser => background,
        };
        Brush { color, width: self.width(), cap: self.cap, join: self.join }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eraser_paints_background_regardless_of_color() {
        let mut tools = ToolConfig { color: Color::rgb(255, 0, 0), ..ToolConfig::default() };
        tools.tool = ToolKind::Eraser;
        assert_eq!(tools.brush(Color::WHITE).color, Color::WHITE);

        tools.tool = ToolKind::Pencil;
        assert_eq!(tools.brush(Color::WHITE).color, Color::rgb(255, 0, 0));
    }

    #[test]
    fn widths_are_kept_per_tool() {
        let mut tools = ToolConfig::default();
        tools.set_width(3.0);
        tools.tool = ToolKind::Eraser;
        tools.set_width(24.0);
        assert_eq!(tools.width(), 24.0);
        tools.tool = ToolKind::Pencil;
        assert_eq!(tools.width(), 3.0);
    }

    #[test]
    fn rejects_non_positive_width() {
        let mut tools = ToolConfig::default();
        let before = tools.width();
        tools.set_width(0.0);
        tools.set_width(f32::NAN);
        assert_eq!(tools.width(), before);
    }

    #[test]
    fn cap_and_join_cycle_through_every_style() {
        let mut cap = LineCap::Round;
        for _ in LineCap::all() {
            cap = cap.next();
        }
        assert_eq!(cap, LineCap::Round);

        let mut join = LineJoin::Round;
        for _ in LineJoin::all() {
            join = join.next();
        }
        assert_eq!(join, LineJoin::Round);
    }
}
