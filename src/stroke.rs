// Turns pointer events into stroke pixels.
//
//   Idle --down--> Drawing --move--> Drawing --up/leave--> Idle (+ commit)
//
// Each segment resolves its brush from the tool configuration live at the
// moment it is drawn; pixels already on the surface are never repainted.

use crate::raster::{stroke_join, stroke_segment};
use crate::surface::Surface;
use crate::tool::ToolConfig;
use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Drawing {
        /// Last recorded position, surface space.
        last: Point,
        /// Position before `last`, once the stroke has a segment to join onto.
        prev: Option<Point>,
        segments: usize,
    },
}

#[derive(Debug, Default)]
pub struct StrokeRenderer {
    state: StrokeState,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Begin a stroke and paint a dot under the pointer.
    /// A second pointer-down mid-stroke is ignored.
    pub fn pointer_down(&mut self, surface: &mut Surface, tools: &ToolConfig, viewport: Point) {
        if self.is_drawing() {
            log::debug!("pointer down while drawing, ignored");
            return;
        }
        let at = surface.to_local(viewport);
        let brush = tools.brush(surface.background());
        stroke_segment(surface, at, at, &brush);
        log::debug!("stroke start at ({:.1}, {:.1}) with {:?}", at.x, at.y, tools.tool);
        self.state = StrokeState::Drawing { last: at, prev: None, segments: 0 };
    }

    /// Extend the stroke to the pointer. Ignored while idle.
    pub fn pointer_move(&mut self, surface: &mut Surface, tools: &ToolConfig, viewport: Point) {
        let StrokeState::Drawing { last, prev, segments } = self.state else {
            return;
        };
        let at = surface.to_local(viewport);
        if at == last {
            return;
        }
        let brush = tools.brush(surface.background());
        if let Some(prev) = prev {
            stroke_join(surface, prev, last, at, &brush);
        }
        stroke_segment(surface, last, at, &brush);
        self.state = StrokeState::Drawing { last: at, prev: Some(last), segments: segments + 1 };
    }

    /// End the stroke. Returns true when a stroke was in progress, meaning the
    /// caller must save a snapshot; false (no-op) when already idle.
    pub fn pointer_up(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            StrokeState::Drawing { segments, .. } => {
                log::debug!("stroke committed after {segments} segments");
                true
            }
            StrokeState::Idle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolKind;
    use crate::types::Color;

    fn setup() -> (Surface, ToolConfig, StrokeRenderer) {
        let surface = Surface::new(40, 40, Color::WHITE);
        let tools = ToolConfig { pencil_width: 1.0, ..ToolConfig::default() };
        (surface, tools, StrokeRenderer::new())
    }

    #[test]
    fn click_without_move_leaves_a_dot_and_commits() {
        let (mut s, tools, mut r) = setup();
        r.pointer_down(&mut s, &tools, Point::new(5.0, 5.0));
        assert!(r.is_drawing());
        assert_eq!(s.get(5, 5), Some(Color::BLACK));
        assert!(r.pointer_up());
        assert_eq!(r.state(), StrokeState::Idle);
    }

    #[test]
    fn up_and_move_while_idle_are_no_ops() {
        let (mut s, tools, mut r) = setup();
        r.pointer_move(&mut s, &tools, Point::new(5.0, 5.0));
        assert!(!r.pointer_up());
        assert!(s.pixels.iter().all(|&p| p == Color::WHITE.0));
    }

    #[test]
    fn moves_draw_connected_segments() {
        let (mut s, tools, mut r) = setup();
        r.pointer_down(&mut s, &tools, Point::new(2.0, 2.0));
        r.pointer_move(&mut s, &tools, Point::new(10.0, 2.0));
        r.pointer_move(&mut s, &tools, Point::new(10.0, 10.0));
        for x in 2..=10 {
            assert_eq!(s.get(x, 2), Some(Color::BLACK));
        }
        for y in 2..=10 {
            assert_eq!(s.get(10, y), Some(Color::BLACK));
        }
        assert!(matches!(r.state(), StrokeState::Drawing { segments: 2, .. }));
    }

    #[test]
    fn pointer_is_translated_by_surface_origin() {
        let (s, tools, mut r) = setup();
        let mut s = s.with_origin(Point::new(100.0, 50.0));
        r.pointer_down(&mut s, &tools, Point::new(103.0, 54.0));
        assert_eq!(s.get(3, 4), Some(Color::BLACK));
    }

    #[test]
    fn width_change_mid_stroke_only_affects_later_segments() {
        let (mut s, mut tools, mut r) = setup();
        r.pointer_down(&mut s, &tools, Point::new(2.0, 10.0));
        r.pointer_move(&mut s, &tools, Point::new(12.0, 10.0));
        tools.set_width(9.0);
        r.pointer_move(&mut s, &tools, Point::new(30.0, 10.0));
        // first segment stays a hairline
        assert_eq!(s.get(6, 12), Some(Color::WHITE));
        // second segment is wide
        assert_eq!(s.get(20, 14), Some(Color::BLACK));
    }

    #[test]
    fn eraser_paints_background() {
        let (mut s, mut tools, mut r) = setup();
        s.pixels.fill(Color::rgb(9, 9, 9).0);
        tools.tool = ToolKind::Eraser;
        tools.eraser_width = 1.0;
        r.pointer_down(&mut s, &tools, Point::new(3.0, 3.0));
        assert_eq!(s.get(3, 3), Some(Color::WHITE));
    }
}
