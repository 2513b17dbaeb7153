use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    poll, read, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, terminal, QueueableCommand};

use crate::canvas::{Canvas, Rgb};

/// Two stacked pixels per terminal cell: foreground is the top one, background the bottom.
const HALF_BLOCK: char = '▀';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermCell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

/// Terminal cells for a canvas, row-major, `canvas.width()` columns by `ceil(height / 2)` rows.
pub fn compose(canvas: &Canvas) -> Vec<TermCell> {
    let cols = canvas.width();
    let rows = (canvas.height() + 1) / 2;
    let mut cells = Vec::with_capacity(cols as usize * rows as usize);

    for row in 0..rows {
        for x in 0..cols {
            let top = canvas.pixel(x, row * 2).unwrap_or_default();
            let bottom = canvas.pixel(x, row * 2 + 1).unwrap_or_default();
            cells.push(TermCell { ch: HALF_BLOCK, fg: top, bg: bottom, bold: false });
        }
    }

    for span in canvas.text() {
        let row = span.y / 2;
        if row >= rows {
            continue;
        }
        for (i, ch) in span.text.chars().enumerate() {
            let x = span.x + i as u32;
            if x >= cols {
                break;
            }
            let cell = &mut cells[(row * cols + x) as usize];
            let bg = span.style.stroke.unwrap_or(cell.fg);
            *cell = TermCell { ch, fg: span.style.fill, bg, bold: span.style.bold };
        }
    }

    cells
}

pub struct TermManager {
    stdout: Stdout,
    buf: Vec<u8>,
    last: Option<(u32, Vec<TermCell>)>,
    /// Set when the terminal agreed to report repeat/release kinds, so `restore` pops it.
    enhanced_keys: bool,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager {
            stdout: stdout(),
            buf: Vec::with_capacity(64 * 1024),
            last: None,
            enhanced_keys: false,
        }
    }

    pub fn setup(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        self.buf.clear();
        self.buf.queue(EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(cursor::DisableBlinking)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;

        // Without this, a held key arrives as a stream of plain presses.
        self.enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.enhanced_keys {
            let flags = KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
            self.buf.queue(PushKeyboardEnhancementFlags(flags))?;
        }
        self.flush_buf()
    }

    pub fn restore(&mut self) -> Result<()> {
        self.buf.clear();
        if self.enhanced_keys {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::EnableBlinking)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("Error unsetting raw mode")
    }

    pub fn get_terminal_size(&self) -> Result<(u16, u16)> {
        terminal::size().context("Error reading terminal size")
    }

    /// Wait up to `timeout` for input, then drain every key-down event already queued.
    pub fn read_key_events(&self, timeout: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];
        let mut wait = timeout;

        while poll(wait)? {
            if let Event::Key(ev) = read()? {
                if ev.kind != KeyEventKind::Release {
                    events.push(ev);
                }
            }
            wait = Duration::ZERO;
        }

        Ok(events)
    }

    /// Write the canvas, touching only cells that changed since the last call.
    pub fn present(&mut self, canvas: &Canvas) -> Result<()> {
        let cols = canvas.width();
        let cells = compose(canvas);

        let prev = match self.last.take() {
            Some((w, prev)) if w == cols && prev.len() == cells.len() => Some(prev),
            _ => None,
        };

        self.buf.clear();
        let mut style: Option<(Rgb, Rgb, bool)> = None;
        let mut cursor_at: Option<usize> = None;

        for (i, cell) in cells.iter().enumerate() {
            if prev.as_ref().map_or(false, |p| p[i] == *cell) {
                continue;
            }

            if cursor_at != Some(i) {
                let (x, y) = (i as u32 % cols, i as u32 / cols);
                self.buf.queue(cursor::MoveTo(x as u16, y as u16))?;
            }
            if style != Some((cell.fg, cell.bg, cell.bold)) {
                let attr = if cell.bold { Attribute::Bold } else { Attribute::NormalIntensity };
                self.buf.queue(SetAttribute(attr))?;
                self.buf.queue(SetForegroundColor(to_color(cell.fg)))?;
                self.buf.queue(SetBackgroundColor(to_color(cell.bg)))?;
                style = Some((cell.fg, cell.bg, cell.bold));
            }
            self.buf.queue(Print(cell.ch))?;
            cursor_at = if (i as u32 + 1) % cols == 0 { None } else { Some(i + 1) };
        }

        self.flush_buf()?;
        self.last = Some((cols, cells));
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush().context("Error flushing")
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}
