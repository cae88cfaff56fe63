//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The 320×400 world maps onto a 40×20 cell field: one column per 8 world
//! units and one row per stack level.

use crate::core::{BlockSnapshot, GameSnapshot, Span};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, ACTIVE_BLOCK_Y, BLOCK_HEIGHT, GAME_HEIGHT, GAME_WIDTH, PALETTE};

/// Play field width in terminal columns.
pub const FIELD_COLS: u16 = 40;
/// Play field height in terminal rows.
pub const FIELD_ROWS: u16 = 20;

const COL_PX: f32 = GAME_WIDTH / FIELD_COLS as f32;
const ROW_PX: f32 = BLOCK_HEIGHT;

const FIELD_BG: Rgb = Rgb::new(24, 20, 48);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const GOLD: Rgb = Rgb::new(250, 204, 21);
const FIELD: CellStyle = CellStyle::new(Rgb::new(70, 60, 110), FIELD_BG);
const BORDER: CellStyle = CellStyle::new(Rgb::new(168, 85, 247), PANEL_BG);
const GUIDE: CellStyle = CellStyle::new(Rgb::new(150, 150, 170), FIELD_BG).dim();
const TITLE: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
const BODY: CellStyle = CellStyle::new(Rgb::new(216, 180, 254), PANEL_BG);
const LABEL: CellStyle = BODY.bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(230, 230, 230), PANEL_BG);
const HOT: CellStyle = CellStyle::new(GOLD, PANEL_BG).bold();

/// Narrowest side panel worth drawing.
const MIN_PANEL_W: u16 = 12;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the stacking game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

/// Screen placement of the bordered field for one frame.
#[derive(Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl Frame {
    /// Paint `ch` over the columns a world span covers on a field row.
    fn fill_span(self, fb: &mut FrameBuffer, span: Span, row: u16, ch: char, style: CellStyle) {
        if let Some((col, len)) = span_columns(span) {
            fb.fill_rect(self.x + 1 + col, self.y + 1 + row, len, 1, ch, style);
        }
    }

    /// Write `text` horizontally centered inside the frame.
    fn centered(self, fb: &mut FrameBuffer, y: u16, text: &str, style: CellStyle) {
        let text_w = text.chars().count() as u16;
        fb.put_str(self.center_x(text_w), y, text, style);
    }

    fn center_x(self, content_w: u16) -> u16 {
        self.x.saturating_add(self.w.saturating_sub(content_w) / 2)
    }

    fn mid_y(self) -> u16 {
        self.y + self.h / 2
    }

    fn draw_border(self, fb: &mut FrameBuffer) {
        if self.w < 2 || self.h < 2 {
            return;
        }
        let (right, bottom) = (self.x + self.w - 1, self.y + self.h - 1);

        fb.fill_rect(self.x + 1, self.y, self.w - 2, 1, '─', BORDER);
        fb.fill_rect(self.x + 1, bottom, self.w - 2, 1, '─', BORDER);
        fb.fill_rect(self.x, self.y + 1, 1, self.h - 2, '│', BORDER);
        fb.fill_rect(right, self.y + 1, 1, self.h - 2, '│', BORDER);

        for (cx, cy, ch) in [
            (self.x, self.y, '┌'),
            (right, self.y, '┐'),
            (self.x, bottom, '└'),
            (right, bottom, '┘'),
        ] {
            fb.put_char(cx, cy, ch, BORDER);
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Top-left corner of the field frame for a viewport.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = frame_size();
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (x, y) = self.frame_origin(viewport);
        let (w, h) = frame_size();
        let frame = Frame { x, y, w, h };

        fb.fill_rect(x + 1, y + 1, FIELD_COLS, FIELD_ROWS, ' ', FIELD);
        frame.draw_border(fb);

        // The guide marks the top block one row above the slider.
        if let (Some(guide), Some(row)) = (snap.guide, row_of(ACTIVE_BLOCK_Y - ROW_PX)) {
            frame.fill_span(fb, guide, row, '─', GUIDE);
        }

        for block in snap.stack.iter() {
            draw_block(fb, frame, block, false);
        }
        if let Some(active) = snap.active.as_ref() {
            draw_block(fb, frame, active, true);
        }

        for d in snap.debris.iter() {
            if let Some(row) = row_of(d.y) {
                let style = CellStyle::new(palette_rgb(d.color), FIELD_BG).dim();
                frame.fill_span(fb, Span::new(d.x, d.width), row, debris_glyph(d.rotation), style);
            }
        }

        draw_side_panel(fb, snap, viewport, frame);

        match snap.phase {
            Phase::Menu => draw_menu(fb, frame),
            Phase::Dead => draw_game_over(fb, snap, frame),
            Phase::Playing if snap.paused => frame.centered(fb, frame.mid_y(), "PAUSED", TITLE),
            Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }
}

fn draw_block(fb: &mut FrameBuffer, frame: Frame, block: &BlockSnapshot, active: bool) {
    let Some(row) = row_of(block.y) else {
        return;
    };
    let mut style = CellStyle::new(palette_rgb(block.color), FIELD_BG);
    if active {
        style = style.bold();
    }
    frame.fill_span(fb, Span::new(block.x, block.width), row, '█', style);
}

fn draw_side_panel(fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
    let px = frame.x.saturating_add(frame.w).saturating_add(2);
    if viewport.width.saturating_sub(px) < MIN_PANEL_W {
        return;
    }

    let mut y = frame.y;
    for (label, value) in [("SCORE", snap.score), ("BEST", snap.best), ("HEIGHT", snap.height)] {
        fb.put_str(px, y, label, LABEL);
        fb.put_u32(px, y.saturating_add(1), value, VALUE);
        y = y.saturating_add(3);
    }

    if snap.streak > 0 {
        fb.put_char(px, y, 'x', HOT);
        let end = fb.put_u32(px + 1, y, snap.streak, HOT);
        fb.put_str(end + 1, y, "PERFECT!", HOT);
    }
    y = y.saturating_add(2);

    fb.put_str(px, y, "RULES", LABEL);
    fb.put_str(px, y.saturating_add(1), snap.rules_name, VALUE);
    y = y.saturating_add(3);

    let hints = ["SPACE drop", "P pause", "R restart", "Q quit"];
    for (hint, row) in hints.into_iter().zip(y..viewport.height) {
        fb.put_str(px, row, hint, VALUE.dim());
    }
}

fn draw_menu(fb: &mut FrameBuffer, frame: Frame) {
    let mid = frame.mid_y();
    frame.centered(fb, mid - 3, "STACK & SLIDE", TITLE);
    frame.centered(fb, mid - 1, "Stack blocks on a sliding tower!", BODY);
    frame.centered(fb, mid, "Tap to place. Don't miss!", BODY);
    frame.centered(fb, mid + 2, "Tap to Start", TITLE);
}

fn draw_game_over(fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
    let mid = frame.mid_y();
    frame.centered(fb, mid - 3, "GAME OVER", TITLE);

    let x = frame.center_x(decimal_width(snap.score));
    fb.put_u32(x, mid - 2, snap.score, TITLE);

    const HEIGHT_LABEL: &str = "Height: ";
    let x = frame.center_x(HEIGHT_LABEL.len() as u16 + decimal_width(snap.height));
    let x = fb.put_str(x, mid - 1, HEIGHT_LABEL, BODY);
    fb.put_u32(x, mid - 1, snap.height, BODY);

    if snap.new_best {
        frame.centered(fb, mid, "NEW BEST!", TITLE.with_fg(GOLD));
    }
    frame.centered(fb, mid + 2, "Tap to Retry", BODY);
}

/// Frame size including the border.
pub fn frame_size() -> (u16, u16) {
    (FIELD_COLS + 2, FIELD_ROWS + 2)
}

/// Field columns covered by a world span, clipped to the field.
pub fn span_columns(span: Span) -> Option<(u16, u16)> {
    if span.width <= 0.0 {
        return None;
    }
    let c0 = (span.left / COL_PX).floor().max(0.0);
    let c1 = (span.right() / COL_PX).ceil().min(FIELD_COLS as f32);
    if c1 <= c0 {
        return None;
    }
    Some((c0 as u16, (c1 - c0) as u16))
}

/// Field row for a screen y (top edge), if on screen.
pub fn row_of(y: f32) -> Option<u16> {
    if !(0.0..GAME_HEIGHT).contains(&y) {
        return None;
    }
    Some((y / ROW_PX) as u16)
}

/// Debris shading by spin angle.
pub fn debris_glyph(rotation: f32) -> char {
    let angle = rotation.rem_euclid(90.0);
    if angle < 30.0 {
        '▓'
    } else if angle < 60.0 {
        '▒'
    } else {
        '░'
    }
}

fn palette_rgb(color: u8) -> Rgb {
    Rgb::from_hex(PALETTE[color as usize % PALETTE.len()])
}

fn decimal_width(mut n: u32) -> u16 {
    let mut w = 1;
    while n >= 10 {
        n /= 10;
        w += 1;
    }
    w
}
