//! Line-oriented command driver.
//!
//! Each input line is one user intent (a key press, a mouse event, a menu
//! action). Commands are applied to the document in order; a failing command
//! is reported and the session continues.

use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use textpad_core::clipboard::ClipboardProvider;
use textpad_core::document::Document;
use textpad_core::persistence::PersistenceProvider;

/// One user intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Types every character of the text, one edit per character.
    Type(String),
    Newline,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    /// Mouse button down.
    Click { x: f32, y: f32 },
    Drag { x: f32, y: f32 },
    /// Mouse button up.
    Release { x: f32, y: f32 },
    Copy,
    Cut,
    Paste,
    Undo,
    Redo,
    ZoomIn,
    ZoomOut,
    Resize { width: f32, height: f32 },
    Save,
    Print,
    Status,
    Quit,
}

fn parse_pair(name: &str, args: &str) -> Result<(f32, f32)> {
    let mut parts = args.split_whitespace();
    let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("{name} expects two numbers");
    };
    let a = a
        .parse()
        .with_context(|| format!("{name}: invalid number {a:?}"))?;
    let b = b
        .parse()
        .with_context(|| format!("{name}: invalid number {b:?}"))?;
    Ok((a, b))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let (name, args) = match line.split_once(' ') {
            Some((name, args)) => (name, args),
            None => (line, ""),
        };
        let no_args = |cmd: Command| {
            if args.trim().is_empty() {
                Ok(cmd)
            } else {
                Err(anyhow!("{name} takes no arguments"))
            }
        };
        match name {
            "type" if args.is_empty() => bail!("type expects text"),
            "type" => Ok(Self::Type(args.to_string())),
            "newline" => no_args(Self::Newline),
            "backspace" => no_args(Self::Backspace),
            "left" => no_args(Self::Left),
            "right" => no_args(Self::Right),
            "up" => no_args(Self::Up),
            "down" => no_args(Self::Down),
            "click" => parse_pair(name, args).map(|(x, y)| Self::Click { x, y }),
            "drag" => parse_pair(name, args).map(|(x, y)| Self::Drag { x, y }),
            "release" => parse_pair(name, args).map(|(x, y)| Self::Release { x, y }),
            "copy" => no_args(Self::Copy),
            "cut" => no_args(Self::Cut),
            "paste" => no_args(Self::Paste),
            "undo" => no_args(Self::Undo),
            "redo" => no_args(Self::Redo),
            "zoom-in" => no_args(Self::ZoomIn),
            "zoom-out" => no_args(Self::ZoomOut),
            "resize" => {
                parse_pair(name, args).map(|(width, height)| Self::Resize { width, height })
            }
            "save" => no_args(Self::Save),
            "print" => no_args(Self::Print),
            "status" => no_args(Self::Status),
            "quit" => no_args(Self::Quit),
            other => bail!("unknown command: {other:?}"),
        }
    }
}

/// A document plus the host capabilities its commands need.
pub struct Session<P: PersistenceProvider> {
    doc: Document,
    clipboard: Box<dyn ClipboardProvider>,
    persistence: P,
}

impl<P: PersistenceProvider> Session<P> {
    pub fn new(doc: Document, clipboard: Box<dyn ClipboardProvider>, persistence: P) -> Self {
        Self {
            doc,
            clipboard,
            persistence,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Applies one command, writing any output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails (save, clipboard, rejected zoom)
    /// or `out` cannot be written. The document is unchanged on failure.
    pub fn apply(&mut self, command: Command, out: &mut dyn Write) -> Result<ControlFlow<()>> {
        let doc = &mut self.doc;
        match command {
            Command::Type(text) => {
                for ch in text.chars() {
                    doc.type_char(ch);
                }
            }
            Command::Newline => doc.insert_newline(),
            Command::Backspace => {
                doc.backspace();
            }
            Command::Left => doc.move_left(),
            Command::Right => doc.move_right(),
            Command::Up => doc.move_up(),
            Command::Down => doc.move_down(),
            Command::Click { x, y } => doc.mouse_press(x, y),
            Command::Drag { x, y } => doc.mouse_drag(x, y),
            Command::Release { x, y } => {
                doc.mouse_release(x, y);
            }
            Command::Copy => {
                doc.copy(self.clipboard.as_mut())?;
            }
            Command::Cut => {
                doc.cut(self.clipboard.as_mut())?;
            }
            Command::Paste => {
                doc.paste(self.clipboard.as_mut())?;
            }
            Command::Undo => {
                doc.undo();
            }
            Command::Redo => {
                doc.redo();
            }
            Command::ZoomIn => doc.zoom_in()?,
            Command::ZoomOut => doc.zoom_out()?,
            Command::Resize { width, height } => doc.resize(width, height),
            Command::Save => {
                doc.save(&self.persistence)?;
                writeln!(out, "saved")?;
            }
            Command::Print => writeln!(out, "{}", doc.text())?,
            Command::Status => writeln!(out, "{}", status_line(doc))?,
            Command::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }
}

/// One-line summary of cursor, selection, and layout state.
pub fn status_line(doc: &Document) -> String {
    let c = doc.cursor();
    let selection = doc
        .selection()
        .map_or_else(|| "none".to_string(), |s| format!("{}..{}", s.start, s.end));
    format!(
        "cursor={} line={} x={} y={} lines={} len={} selection={} font={} modified={}",
        c.index,
        c.line,
        c.x,
        c.y,
        doc.layout().total_lines(),
        doc.len(),
        selection,
        doc.font_size(),
        doc.is_modified(),
    )
}

/// Reads commands from `input` until `quit` or end of input.
///
/// # Errors
///
/// Returns an error only if reading `input` or writing `out` fails.
pub fn run<P: PersistenceProvider>(
    session: &mut Session<P>,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read command")?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.trim_start().parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                tracing::error!("{e:#}");
                continue;
            }
        };
        tracing::debug!(?command, "applying");
        match session.apply(command, &mut out) {
            Ok(ControlFlow::Break(())) => break,
            Ok(ControlFlow::Continue(())) => {}
            Err(e) => tracing::error!("{e:#}"),
        }
    }
    out.flush().context("failed to flush output")?;
    if session.document().is_modified() {
        tracing::warn!("exiting with unsaved changes");
    }
    Ok(())
}
