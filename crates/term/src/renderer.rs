//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed against the previous one and only changed runs of cells
//! are re-emitted. A size change, or an explicit `invalidate`, forces a full
//! redraw.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, event, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

const BELL: u8 = 0x07;

/// Owns the terminal session and the previously presented frame.
pub struct TerminalRenderer {
    out: io::Stdout,
    shown: Option<FrameBuffer>,
    pending: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            shown: None,
            pending: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor and mouse capture.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.pending.clear();
        queue!(
            self.pending,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.present()
    }

    /// Undo everything `enter` did. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.pending.clear();
        queue!(
            self.pending,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen
        )?;
        self.present()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Drop the remembered frame so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Ring the terminal bell.
    pub fn bell(&mut self) -> Result<()> {
        self.pending.clear();
        self.pending.push(BELL);
        self.present()
    }

    /// Present `fb`, then hand back the previous frame's buffer in its place.
    ///
    /// The caller keeps drawing into the same `FrameBuffer` each frame; the
    /// two buffers trade places so no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.pending.clear();
        let mut spare = match self.shown.take() {
            Some(shown) if (shown.width(), shown.height()) == (fb.width(), fb.height()) => {
                encode_diff_into(&shown, fb, &mut self.pending)?;
                shown
            }
            stale => {
                encode_full_into(fb, &mut self.pending)?;
                stale.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()))
            }
        };
        self.present()?;

        spare.resize(fb.width(), fb.height());
        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.out.write_all(&self.pending)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All))?;

    let mut pen = Pen::default();
    for line in 0..fb.height() {
        queue!(out, cursor::MoveTo(0, line))?;
        pen.print_run(out, fb.row(line))?;
    }
    pen.finish(out)
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for_each_changed_run(prev, next, |col, line, len| {
        queue!(out, cursor::MoveTo(col, line))?;
        let run = &next.row(line)[col as usize..(col + len) as usize];
        pen.print_run(out, run)
    })?;
    pen.finish(out)
}

/// Tracks the terminal's current SGR state so only changes are emitted.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print_run(&mut self, out: &mut Vec<u8>, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            self.set_style(out, cell.style)?;
            queue!(out, Print(cell.ch))?;
        }
        Ok(())
    }

    fn set_style(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = match self.style {
            Some(prev) if prev == style => return Ok(()),
            Some(prev) if prev.bold == style.bold && prev.dim == style.dim => Some(prev),
            _ => None,
        };

        // An attribute change goes through a full SGR reset, which also drops colors.
        if prev.is_none() {
            queue!(out, SetAttribute(Attribute::Reset))?;
            for (on, attr) in [(style.bold, Attribute::Bold), (style.dim, Attribute::Dim)] {
                if on {
                    queue!(out, SetAttribute(attr))?;
                }
            }
        }
        if prev.map(|p| p.fg) != Some(style.fg) {
            queue!(out, SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if prev.map(|p| p.bg) != Some(style.bg) {
            queue!(out, SetBackgroundColor(rgb_to_color(style.bg)))?;
        }
        self.style = Some(style);
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(col, row, len)` for every horizontal run of cells that differ.
///
/// Buffers of different sizes report every row as one full-width run.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let same_size = (prev.width(), prev.height()) == (next.width(), next.height());
    for line in 0..next.height() {
        if !same_size {
            f(0, line, next.width())?;
            continue;
        }
        let (old, new) = (prev.row(line), next.row(line));
        if old == new {
            continue;
        }

        let mut run_start: Option<usize> = None;
        for (col, (a, b)) in old.iter().zip(new).enumerate() {
            match (a != b, run_start) {
                (true, None) => run_start = Some(col),
                (false, Some(start)) => {
                    f(start as u16, line, (col - start) as u16)?;
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            f(start as u16, line, (new.len() - start) as u16)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(a: &FrameBuffer, b: &FrameBuffer) -> Vec<(u16, u16, u16)> {
        let mut runs = Vec::new();
        for_each_changed_run(a, b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        runs
    }

    #[test]
    fn style_conversion_keeps_channels() {
        let style = CellStyle {
            fg: Rgb::from_hex(0x3b82f6),
            ..CellStyle::default()
        };
        assert_eq!(
            rgb_to_color(style.fg),
            Color::Rgb {
                r: 0x3b,
                g: 0x82,
                b: 0xf6
            }
        );
    }

    #[test]
    fn changed_run_iterator_coalesces_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(5, 1);
        let mut b = FrameBuffer::new(5, 1);

        // Change cells [1..=3] into X.
        for x in 1..=3 {
            b.set(x, 0, Cell { ch: 'X', style });
        }
        assert_eq!(runs(&a, &b), vec![(1, 0, 3)]);
    }

    #[test]
    fn changed_runs_split_on_unchanged_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        b.set(0, 0, Cell { ch: 'A', style });
        b.set(2, 0, Cell { ch: 'B', style });
        b.set(5, 1, Cell { ch: 'C', style });
        assert_eq!(runs(&a, &b), vec![(0, 0, 1), (2, 0, 1), (5, 1, 1)]);
    }

    #[test]
    fn identical_frames_encode_no_cells() {
        let a = FrameBuffer::new(4, 2);
        let b = FrameBuffer::new(4, 2);
        assert!(runs(&a, &b).is_empty());

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        assert!(!out.contains(&b' '));
    }

    #[test]
    fn full_redraw_prints_every_cell() {
        let mut fb = FrameBuffer::new(3, 2);
        let style = CellStyle::default();
        fb.put_str(0, 0, "abc", style);
        fb.put_str(0, 1, "def", style);

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("abc"));
        assert!(text.contains("def"));
    }

    #[test]
    fn pen_skips_repeated_styles() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "abcd", CellStyle::default());

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("abcd"));
        assert_eq!(text.matches("38;2;").count(), 1);
    }
}
