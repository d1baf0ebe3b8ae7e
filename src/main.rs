// What you SEE:
// • A toolbar strip on top (color swatch + status), the white drawing surface below.
// • Hold Left Mouse to draw. Leaving the surface ends the stroke.
// • P pencil, E eraser, 1-8 palette colors, [ and ] stroke width,
//   K cycle line cap, J cycle line join.
// • Z undo, Y redo, C clear, S save PNG, D save PDF. ESC quits.

use clap::Parser;
use minifb::Key;
use sketchpad::canvas::{Action, Canvas, Outcome};
use sketchpad::config::Config;
use sketchpad::draw::{Drawer, FrameBuffer, TOOLBAR_HEIGHT, compose, over_surface};
use sketchpad::error::Error;
use sketchpad::export;
use sketchpad::tool::ToolKind;
use sketchpad::types::{Color, Point};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Raster sketchpad with undo/redo and PNG/PDF export.
#[derive(Parser, Debug)]
#[command(name = "sketchpad", version)]
struct Args {
    /// Surface width in pixels
    #[arg(long)]
    width: Option<u32>,
    /// Surface height in pixels
    #[arg(long)]
    height: Option<u32>,
    /// Background color, #rrggbb
    #[arg(long)]
    background: Option<Color>,
    /// Initial pencil color, #rrggbb
    #[arg(long)]
    color: Option<Color>,
    #[arg(long)]
    pencil_width: Option<f32>,
    #[arg(long)]
    eraser_width: Option<f32>,
    /// Keep at most this many undo snapshots (default: unlimited)
    #[arg(long)]
    history_limit: Option<NonZeroUsize>,
    /// Where exported files are written
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Config {
        let d = Config::default();
        Config {
            width: self.width.unwrap_or(d.width),
            height: self.height.unwrap_or(d.height),
            background: self.background.unwrap_or(d.background),
            color: self.color.unwrap_or(d.color),
            pencil_width: self.pencil_width.unwrap_or(d.pencil_width),
            eraser_width: self.eraser_width.unwrap_or(d.eraser_width),
            history_limit: self.history_limit.or(d.history_limit),
            out_dir: self.out_dir.unwrap_or(d.out_dir),
            ..d
        }
    }
}

const SWATCH_KEYS: [Key; 8] = [
    Key::Key1, Key::Key2, Key::Key3, Key::Key4,
    Key::Key5, Key::Key6, Key::Key7, Key::Key8,
];

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Args::parse().into_config();

    /* --- Canvas + window setup ---
       Visual: window opens with an empty surface under the toolbar. */
    let mut canvas = Canvas::new(&config)?.with_origin(Point::new(0.0, TOOLBAR_HEIGHT as f32));
    let (w, h) = (config.width as usize, config.height as usize + TOOLBAR_HEIGHT);
    let mut drawer = Drawer::new("Sketchpad", w, h)?;
    let mut screen = FrameBuffer::new(w, h);

    let mut was_down = false;
    let mut last_pos = Point::default();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Land a finished undo/redo restore, if one is ready. */
        if let Err(e) = canvas.poll_restore() {
            log::error!("undo/redo failed: {e}");
        }

        /* 2) Pointer → stroke events. */
        let mouse = drawer.mouse_pos();
        let down = drawer.left_mouse_down();
        let over = mouse.filter(|&m| over_surface(canvas.surface(), m));
        let mut actions = Vec::new();
        match over {
            Some(p) if down && !was_down => actions.push(Action::PointerDown(p)),
            Some(p) if down && p != last_pos => actions.push(Action::PointerMove(p)),
            Some(p) if !down && canvas.is_drawing() => actions.push(Action::PointerUp(p)),
            None if canvas.is_drawing() => actions.push(Action::PointerLeave(last_pos)),
            _ => {}
        }
        if let Some(p) = over {
            last_pos = p;
        }
        was_down = down;

        /* 3) Keys → tool changes, history, export. */
        actions.extend(key_actions(&drawer, &canvas));

        for action in actions {
            handle(&mut canvas, action, &config);
        }

        /* 4) Present. */
        compose(&mut screen, &canvas, mouse);
        drawer.present(&screen)?;
    }

    canvas.finish_restore()?;
    Ok(())
}

fn key_actions(drawer: &Drawer, canvas: &Canvas) -> Vec<Action> {
    let tools = canvas.tools();
    let mut out = Vec::new();
    let bindings = [
        (Key::P, Action::SelectTool(ToolKind::Pencil)),
        (Key::E, Action::SelectTool(ToolKind::Eraser)),
        (Key::LeftBracket, Action::SetWidth((tools.width() - 1.0).max(1.0))),
        (Key::RightBracket, Action::SetWidth(tools.width() + 1.0)),
        (Key::K, Action::SetCap(tools.cap.next())),
        (Key::J, Action::SetJoin(tools.join.next())),
        (Key::C, Action::Clear),
        (Key::Z, Action::Undo),
        (Key::Y, Action::Redo),
        (Key::S, Action::ExportPng),
        (Key::D, Action::ExportPdf),
    ];
    for (key, action) in bindings {
        if drawer.pressed_once(key) {
            out.push(action);
        }
    }
    for (i, key) in SWATCH_KEYS.into_iter().enumerate() {
        if drawer.pressed_once(key) {
            out.push(Action::SelectSwatch(i));
        }
    }
    out
}

/// Dispatch one action. Failures are reported and the session keeps going.
fn handle(canvas: &mut Canvas, action: Action, config: &Config) {
    match canvas.dispatch(action) {
        Ok(Outcome::Exported { name, bytes }) => {
            match export::save_to(&config.out_dir, name, &bytes) {
                Ok(path) => log::info!("saved {}", path.display()),
                Err(e) => log::error!("could not save {name}: {e}"),
            }
        }
        Ok(_) => {}
        Err(e) => log::error!("{action:?} failed: {e}"),
    }
}
