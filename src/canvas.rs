// The drawing controller.
//
// `Canvas` owns the surface, the tool configuration, the stroke state
// machine and the history. Everything outside (the window loop, tests)
// talks to it by sending `Action`s through `Canvas::dispatch`.
//
// Undo and redo decode their snapshot on a worker thread. Until that restore
// lands (see `Canvas::poll_restore` and `Canvas::finish_restore`) any
// input that would touch the surface or move the history cursor is dropped.
// Tool changes and exports still go through.

use crate::config::{Config, PDF_FILENAME, PNG_FILENAME};
use crate::error::Result;
use crate::export;
use crate::history::History;
use crate::restore::PendingRestore;
use crate::stroke::StrokeRenderer;
use crate::surface::{Snapshot, Surface};
use crate::tool::{LineCap, LineJoin, ToolConfig, ToolKind};
use crate::types::{Color, PALETTE, Point};

/// A discrete intent from the UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// Pointer pressed, viewport coordinates.
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    /// Pointer left the surface; ends a stroke exactly like `PointerUp`.
    PointerLeave(Point),
    SelectTool(ToolKind),
    SelectColor(Color),
    /// Pick a color from [`PALETTE`] by index.
    SelectSwatch(usize),
    SetWidth(f32),
    SetCap(LineCap),
    SetJoin(LineJoin),
    Clear,
    Undo,
    Redo,
    ExportPng,
    ExportPdf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Surface or tool state changed; nothing new in history.
    Updated,
    /// A new snapshot was saved.
    Committed,
    /// Undo/redo accepted; the surface changes once the restore completes.
    RestoreStarted,
    /// No-op: nothing to undo/redo, pointer idle, or input blocked by a restore.
    Ignored,
    Exported { name: &'static str, bytes: Vec<u8> },
}

#[derive(Debug)]
pub struct Canvas {
    surface: Surface,
    tools: ToolConfig,
    stroke: StrokeRenderer,
    history: History,
    pending: Option<PendingRestore>,
}

impl Canvas {
    /// Fill the background and record it as the first history entry, so undo
    /// can always return to a blank surface.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let mut canvas = Self {
            surface: Surface::new(config.width as usize, config.height as usize, config.background),
            tools: ToolConfig::from_config(config),
            stroke: StrokeRenderer::new(),
            history: History::new(config.history_limit),
            pending: None,
        };
        canvas.surface.fill_background();
        canvas.save_state()?;
        log::info!("canvas {}x{} ready", config.width, config.height);
        Ok(canvas)
    }

    /// Place the surface at `origin` in viewport space.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.surface = self.surface.with_origin(origin);
        self
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn step(&self) -> Option<usize> {
        self.history.step()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        self.pending.is_none() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.pending.is_none() && self.history.can_redo()
    }

    pub fn is_restoring(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_drawing()
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        use Action::*;

        if self.pending.is_some() && blocked_while_restoring(&action) {
            log::warn!("restore pending, dropping {action:?}");
            return Ok(Outcome::Ignored);
        }

        match action {
            PointerDown(at) => {
                if self.stroke.is_drawing() {
                    return Ok(Outcome::Ignored);
                }
                self.stroke.pointer_down(&mut self.surface, &self.tools, at);
                Ok(Outcome::Updated)
            }
            PointerMove(at) => {
                if !self.stroke.is_drawing() {
                    return Ok(Outcome::Ignored);
                }
                self.stroke.pointer_move(&mut self.surface, &self.tools, at);
                Ok(Outcome::Updated)
            }
            PointerUp(at) | PointerLeave(at) => {
                log::trace!("pointer released at ({:.1}, {:.1})", at.x, at.y);
                self.commit_stroke()
            }
            SelectTool(tool) => {
                self.tools.tool = tool;
                log::debug!("tool: {}", tool.label());
                Ok(Outcome::Updated)
            }
            SelectColor(color) => {
                self.tools.color = color;
                log::debug!("color: {color}");
                Ok(Outcome::Updated)
            }
            SelectSwatch(index) => match PALETTE.get(index) {
                Some(&color) => self.dispatch(SelectColor(color)),
                None => Ok(Outcome::Ignored),
            },
            SetWidth(width) => {
                self.tools.set_width(width);
                Ok(Outcome::Updated)
            }
            SetCap(cap) => {
                self.tools.cap = cap;
                Ok(Outcome::Updated)
            }
            SetJoin(join) => {
                self.tools.join = join;
                Ok(Outcome::Updated)
            }
            Clear => {
                self.commit_stroke()?;
                self.surface.fill_background();
                self.save_state()?;
                Ok(Outcome::Committed)
            }
            Undo => {
                self.commit_stroke()?;
                let from = self.history.step();
                match (from, self.history.undo()) {
                    (Some(from), Some(snapshot)) => self.start_restore(snapshot, from),
                    _ => Ok(Outcome::Ignored),
                }
            }
            Redo => {
                self.commit_stroke()?;
                let from = self.history.step();
                match (from, self.history.redo()) {
                    (Some(from), Some(snapshot)) => self.start_restore(snapshot, from),
                    _ => Ok(Outcome::Ignored),
                }
            }
            ExportPng => {
                let bytes = export::png_bytes(&self.surface)?;
                log::info!("exported {PNG_FILENAME} ({} bytes)", bytes.len());
                Ok(Outcome::Exported { name: PNG_FILENAME, bytes })
            }
            ExportPdf => {
                let bytes = export::pdf_bytes(&self.surface)?;
                log::info!("exported {PDF_FILENAME} ({} bytes)", bytes.len());
                Ok(Outcome::Exported { name: PDF_FILENAME, bytes })
            }
        }
    }

    /// Apply a finished restore, if any. Never blocks.
    /// Returns `Ok(true)` when the surface was just repainted from history.
    pub fn poll_restore(&mut self) -> Result<bool> {
        let Some(decoded) = self.pending.as_mut().and_then(PendingRestore::try_complete) else {
            return Ok(false);
        };
        let Some(pending) = self.pending.take() else {
            return Ok(false);
        };
        self.apply_decoded(pending.from, pending.to, decoded)?;
        Ok(true)
    }

    /// Block until the pending restore (if any) has been applied.
    pub fn finish_restore(&mut self) -> Result<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        let (from, to) = (pending.from, pending.to);
        let decoded = pending.wait();
        self.apply_decoded(from, to, decoded)
    }

    /// Repaint the surface from a decoded snapshot. On any failure the surface
    /// keeps its current pixels and the cursor goes back to `from`, so the
    /// cursor keeps matching what is displayed.
    fn apply_decoded(&mut self, from: usize, to: usize, decoded: Result<Vec<u32>>) -> Result<()> {
        let result = decoded.and_then(|pixels| self.surface.restore(pixels));
        match result {
            Ok(()) => {
                log::info!("restored history step {to}");
                Ok(())
            }
            Err(e) => {
                log::error!("restore of step {to} failed, staying at step {from}: {e}");
                self.history.seek(from);
                Err(e)
            }
        }
    }

    fn start_restore(&mut self, snapshot: Snapshot, from: usize) -> Result<Outcome> {
        let to = self.history.step().unwrap_or(from);
        match PendingRestore::spawn(snapshot, from, to) {
            Ok(pending) => {
                log::debug!("restore {from} -> {to} started");
                self.pending = Some(pending);
                Ok(Outcome::RestoreStarted)
            }
            Err(e) => {
                self.history.seek(from);
                Err(e)
            }
        }
    }

    /// End the in-progress stroke, if any, and save it.
    fn commit_stroke(&mut self) -> Result<Outcome> {
        if !self.stroke.pointer_up() {
            return Ok(Outcome::Ignored);
        }
        self.save_state()?;
        Ok(Outcome::Committed)
    }

    fn save_state(&mut self) -> Result<()> {
        let snapshot = self.surface.snapshot()?;
        self.history.save(snapshot);
        log::debug!("saved step {:?} of {}", self.history.step(), self.history.len());
        Ok(())
    }
}

/// Input that reads or writes the surface, or moves the history cursor.
fn blocked_while_restoring(action: &Action) -> bool {
    matches!(
        action,
        Action::PointerDown(_)
            | Action::PointerMove(_)
            | Action::PointerUp(_)
            | Action::PointerLeave(_)
            | Action::Clear
            | Action::Undo
            | Action::Redo
    )
}
