//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The frame is a fixed size, anchored at the top-left corner of the screen:
//!
//! ```text
//! ╔════════════════════╦════════════════════╗
//! ║                    ║                    ║
//! ║                    ║       SCORE:       ║
//! ║   board, 2 cols    ║         0          ║
//! ║   per cell         ║                    ║
//! ║                    ║       LEVEL:       ║
//! ║                    ║         1          ║
//! ...
//! ╚════════════════════╩════════════════════╝
//! ```

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Width of the score/level/next panel, in terminal columns.
pub const PANEL_WIDTH: u16 = 20;

const PANEL_SCORE_LABEL_ROW: u16 = 1;
const PANEL_SCORE_ROW: u16 = 2;
const PANEL_LEVEL_LABEL_ROW: u16 = 4;
const PANEL_LEVEL_ROW: u16 = 5;
const PANEL_NEXT_LABEL_ROW: u16 = 10;
const PANEL_NEXT_SHAPE_ROW: u16 = 12;

const BLOCK: char = '█';

const INTRO_BANNER: [&str; 4] = [
    "  _____    _       _    ",
    " |_   _|__| |_ _ _(_)___",
    "   | |/ -_)  _| '_| (_-<",
    "   |_|\\___|\\__|_| |_/__/",
];

/// Prompt shown under the intro banner.
pub const INTRO_PROMPT: &str = "Press any key to continue...";

/// Lines of the game-over overlay, with their column inside the frame.
pub const GAME_OVER_LINES: [(u16, &str); 3] = [
    (4, " GAME OVER "),
    (2, " Do you want to "),
    (2, " play again? y/n "),
];

/// Frame row of the first game-over line.
const GAME_OVER_TOP_ROW: u16 = 9;

/// Terminal rendering of the board, side panel and overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub fn board_px_width(&self) -> u16 {
        (BOARD_WIDTH as u16) * self.cell_w
    }

    pub fn board_px_height(&self) -> u16 {
        (BOARD_HEIGHT as u16) * self.cell_h
    }

    /// Size of the whole frame, borders included.
    ///
    /// This never depends on the game state, which bounds the output per frame.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            1 + self.board_px_width() + 1 + PANEL_WIDTH + 1,
            1 + self.board_px_height() + 1,
        )
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path once `fb` has the frame size.
    pub fn render_into(&self, snap: &GameSnapshot, fb: &mut FrameBuffer) {
        let (frame_w, frame_h) = self.frame_size();
        fb.resize(frame_w, frame_h);
        fb.clear(CellStyle::default().into_cell(' '));

        self.draw_border(fb, frame_w, frame_h);

        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                if let Some(color) = snap.color_at(x, y) {
                    self.fill_cell_rect(fb, x as u16, y as u16, BLOCK, block_style(color));
                }
            }
        }

        self.draw_side_panel(fb, snap);

        if snap.game_over() {
            self.draw_game_over(fb);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot) -> FrameBuffer {
        let (w, h) = self.frame_size();
        let mut fb = FrameBuffer::new(w, h);
        self.render_into(snap, &mut fb);
        fb
    }

    /// Render the title banner and the "press any key" prompt.
    pub fn render_intro_into(&self, fb: &mut FrameBuffer) {
        let (frame_w, frame_h) = self.frame_size();
        fb.resize(frame_w, frame_h);
        fb.clear(CellStyle::default().into_cell(' '));

        let style = CellStyle::default();
        for (row, line) in INTRO_BANNER.iter().enumerate() {
            fb.put_str(0, row as u16, line, style);
        }
        fb.put_str(0, INTRO_BANNER.len() as u16 + 1, INTRO_PROMPT, style);
    }

    pub fn render_intro(&self) -> FrameBuffer {
        let (w, h) = self.frame_size();
        let mut fb = FrameBuffer::new(w, h);
        self.render_intro_into(&mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, w: u16, h: u16) {
        let style = CellStyle::default();
        let divider = 1 + self.board_px_width();

        for x in 1..w - 1 {
            fb.put_char(x, 0, '═', style);
            fb.put_char(x, h - 1, '═', style);
        }
        for y in 1..h - 1 {
            fb.put_char(0, y, '║', style);
            fb.put_char(divider, y, '║', style);
            fb.put_char(w - 1, y, '║', style);
        }

        fb.put_char(0, 0, '╔', style);
        fb.put_char(divider, 0, '╦', style);
        fb.put_char(w - 1, 0, '╗', style);
        fb.put_char(0, h - 1, '╚', style);
        fb.put_char(divider, h - 1, '╩', style);
        fb.put_char(w - 1, h - 1, '╝', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = 1 + cell_x * self.cell_w;
        let py = 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot) {
        let panel_x = 2 + self.board_px_width();
        let style = CellStyle::default();

        fb.put_str(panel_x, 1 + PANEL_SCORE_LABEL_ROW, "       SCORE:       ", style);
        fb.put_u32_centered(panel_x, 1 + PANEL_SCORE_ROW, PANEL_WIDTH, snap.score, style);
        fb.put_str(panel_x, 1 + PANEL_LEVEL_LABEL_ROW, "       LEVEL:       ", style);
        fb.put_u32_centered(panel_x, 1 + PANEL_LEVEL_ROW, PANEL_WIDTH, snap.level, style);
        fb.put_str(panel_x, 1 + PANEL_NEXT_LABEL_ROW, "       NEXT:        ", style);

        let shape = get_shape(snap.next.kind);
        let size = shape.size() as u16;
        // Each bitmap cell is two columns wide; center the bitmap in the panel.
        let pad = PANEL_WIDTH / 2 - size;
        let next_style = block_style(snap.next.color);
        for (dx, dy) in shape.cells() {
            let x = panel_x + pad + (dx as u16) * 2;
            let y = 1 + PANEL_NEXT_SHAPE_ROW + dy as u16;
            fb.put_char(x, y, BLOCK, next_style);
            fb.put_char(x + 1, y, BLOCK, next_style);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };
        for (i, (x, text)) in GAME_OVER_LINES.iter().enumerate() {
            fb.put_str(*x, GAME_OVER_TOP_ROW + i as u16, text, style);
        }
    }
}

/// RGB used for a palette color: the bright variants of the ANSI colors.
pub fn palette_rgb(color: Color) -> Rgb {
    match color.get() {
        1 => Rgb::new(255, 85, 85),
        2 => Rgb::new(85, 255, 85),
        3 => Rgb::new(255, 255, 85),
        4 => Rgb::new(85, 85, 255),
        5 => Rgb::new(255, 85, 255),
        6 => Rgb::new(85, 255, 255),
        _ => Rgb::new(255, 255, 255),
    }
}

fn block_style(color: Color) -> CellStyle {
    CellStyle {
        fg: palette_rgb(color),
        bg: Rgb::new(0, 0, 0),
        bold: false,
    }
}
