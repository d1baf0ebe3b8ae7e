//! A raster sketchpad: pencil and eraser strokes on a fixed-size surface,
//! linear undo/redo over whole-surface snapshots, PNG and PDF export.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod export;
pub mod history;
pub mod raster;
pub mod restore;
pub mod stroke;
pub mod surface;
pub mod tool;
pub mod types;

pub use canvas::{Action, Canvas, Outcome};
pub use config::Config;
pub use error::{Error, Result};
