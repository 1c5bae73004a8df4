//! Crossterm frontend
//!
//! The surface is scaled onto a pixel buffer that is two pixels tall per
//! terminal row and drawn with half-block characters.

use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{self, Color as TermColor},
    terminal,
};

use super::{Canvas, Overlays};
use crate::sim::{Color, Surface};

const BACKGROUND: (u8, u8, u8) = (24, 24, 28);
const OVERLAY_FG: (u8, u8, u8) = (240, 240, 240);
const OVERLAY_BG: (u8, u8, u8) = (60, 20, 20);

/// Which dialog is up, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Start,
    End { score: String, best_score: String },
}

impl Dialog {
    fn lines(&self) -> Vec<String> {
        match self {
            Dialog::Start => vec![
                "GRAY DODGE".to_string(),
                String::new(),
                "Arrows to move, avoid everything".to_string(),
                "Enter to start, q to quit".to_string(),
            ],
            Dialog::End { score, best_score } => vec![
                "GAME OVER".to_string(),
                String::new(),
                format!("Score  {score}"),
                format!("Best   {best_score}"),
                String::new(),
                "Enter for menu, q to quit".to_string(),
            ],
        }
    }
}

/// Terminal implementation of the canvas and dialogs
#[derive(Debug)]
pub struct TerminalFrontend {
    surface: Surface,
    width: usize,
    height: usize,
    pixels: Vec<(u8, u8, u8)>,
    dialog: Option<Dialog>,
    status: String,
    dirty: bool,
}

impl TerminalFrontend {
    /// `cols` x `rows` terminal showing a surface of the given size
    pub fn new(surface: Surface, cols: u16, rows: u16) -> Self {
        let width = usize::from(cols.max(1));
        let height = usize::from(rows.max(1)) * 2;
        Self {
            surface,
            width,
            height,
            pixels: vec![BACKGROUND; width * height],
            dialog: None,
            status: String::new(),
            dirty: true,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.width = usize::from(cols.max(1));
        self.height = usize::from(rows.max(1)) * 2;
        self.pixels = vec![BACKGROUND; self.width * self.height];
        self.dirty = true;
    }

    /// True when the buffer changed since the last [`present`](Self::present)
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// One-line HUD text shown in the top-left corner
    pub fn set_status(&mut self, status: impl Into<String>) {
        let status = status.into();
        if status != self.status {
            self.status = status;
            self.dirty = true;
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<(u8, u8, u8)> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Surface rectangle to a pixel range; anything visible covers at least one pixel
    fn to_pixels(&self, x: f32, y: f32, w: f32, h: f32) -> (usize, usize, usize, usize) {
        let scale = |v: f32, pixels: usize, extent: u32| v * pixels as f32 / extent as f32;
        let clamp = |v: f32, max: usize| v.max(0.0).min(max as f32) as usize;

        let x0 = clamp(scale(x, self.width, self.surface.width).floor(), self.width);
        let y0 = clamp(scale(y, self.height, self.surface.height).floor(), self.height);
        let x1 = clamp(scale(x + w, self.width, self.surface.width).ceil(), self.width);
        let y1 = clamp(scale(y + h, self.height, self.surface.height).ceil(), self.height);
        (x0, y0, x1, y1)
    }

    fn fill(&mut self, x: f32, y: f32, w: f32, h: f32, rgb: (u8, u8, u8)) {
        let (x0, y0, x1, y1) = self.to_pixels(x, y, w, h);
        self.dirty = true;
        if x0 >= x1 {
            return;
        }
        for py in y0..y1 {
            let row = py * self.width;
            self.pixels[row + x0..row + x1].fill(rgb);
        }
    }

    /// Write the whole frame to `out`
    pub fn present(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.dirty = false;
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.height / 2;
        for row in 0..rows {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for col in 0..self.width {
                let top = self.pixels[row * 2 * self.width + col];
                let bottom = self.pixels[(row * 2 + 1) * self.width + col];
                queue!(
                    out,
                    style::SetForegroundColor(rgb(top)),
                    style::SetBackgroundColor(rgb(bottom)),
                    style::Print('▀')
                )?;
            }
        }

        if !self.status.is_empty() {
            queue!(
                out,
                cursor::MoveTo(1, 0),
                style::SetForegroundColor(rgb(OVERLAY_FG)),
                style::SetBackgroundColor(rgb(BACKGROUND)),
                style::Print(&self.status)
            )?;
        }

        if let Some(dialog) = &self.dialog {
            self.present_dialog(out, dialog, rows)?;
        }

        queue!(out, style::ResetColor)?;
        out.flush()
    }

    fn present_dialog(&self, out: &mut impl Write, dialog: &Dialog, rows: usize) -> io::Result<()> {
        let lines = dialog.lines();
        let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
        let left = self.width.saturating_sub(inner) / 2;
        let top = rows.saturating_sub(lines.len() + 2) / 2;

        queue!(
            out,
            style::SetForegroundColor(rgb(OVERLAY_FG)),
            style::SetBackgroundColor(rgb(OVERLAY_BG))
        )?;
        let blank = " ".repeat(inner);
        queue!(out, cursor::MoveTo(left as u16, top as u16), style::Print(&blank))?;
        for (i, line) in lines.iter().enumerate() {
            let pad = inner - line.chars().count();
            let text = format!("{}{}{}", " ".repeat(pad / 2), line, " ".repeat(pad - pad / 2));
            queue!(
                out,
                cursor::MoveTo(left as u16, (top + 1 + i) as u16),
                style::Print(text)
            )?;
        }
        queue!(
            out,
            cursor::MoveTo(left as u16, (top + 1 + lines.len()) as u16),
            style::Print(&blank)
        )
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> TermColor {
    TermColor::Rgb { r, g, b }
}

impl Canvas for TerminalFrontend {
    fn clear_region(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.fill(x, y, w, h, BACKGROUND);
    }

    fn draw_filled_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.fill(x, y, w, h, color.rgb());
    }
}

impl Overlays for TerminalFrontend {
    fn show_start_overlay(&mut self) {
        self.dialog = Some(Dialog::Start);
        self.dirty = true;
    }

    fn hide_start_overlay(&mut self) {
        if self.dialog == Some(Dialog::Start) {
            self.dialog = None;
            self.dirty = true;
        }
    }

    fn show_end_overlay(&mut self, score: &str, best_score: &str) {
        self.dialog = Some(Dialog::End {
            score: score.to_string(),
            best_score: best_score.to_string(),
        });
        self.dirty = true;
    }

    fn hide_end_overlay(&mut self) {
        if matches!(self.dialog, Some(Dialog::End { .. })) {
            self.dialog = None;
            self.dirty = true;
        }
    }
}

/// Raw mode plus alternate screen, restored on drop (including unwinding)
pub struct ScreenGuard<W: Write> {
    out: W,
}

impl<W: Write> ScreenGuard<W> {
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self { out };
        execute!(
            guard.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        Ok(guard)
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for ScreenGuard<W> {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontend() -> TerminalFrontend {
        // 800x480 surface on 80x24 cells -> 10x10 surface units per pixel
        TerminalFrontend::new(Surface::new(800, 480), 80, 24)
    }

    #[test]
    fn test_draw_scales_to_pixels() {
        let mut ui = frontend();
        ui.draw_filled_rect(400.0, 240.0, 10.0, 10.0, Color::Red);
        assert_eq!(ui.pixel(40, 24), Some((255, 0, 0)));
        assert_eq!(ui.pixel(41, 24), Some(BACKGROUND));
        assert_eq!(ui.pixel(40, 25), Some(BACKGROUND));
    }

    #[test]
    fn test_tiny_rect_still_visible() {
        let mut ui = frontend();
        ui.draw_filled_rect(123.0, 57.0, 2.0, 2.0, Color::Gray(150));
        assert_eq!(ui.pixel(12, 5), Some((150, 150, 150)));
    }

    #[test]
    fn test_offscreen_rect_is_clipped() {
        let mut ui = frontend();
        ui.draw_filled_rect(-50.0, -50.0, 8.0, 8.0, Color::Gray(150));
        ui.draw_filled_rect(795.0, 475.0, 10.0, 10.0, Color::Gray(200));
        assert_eq!(ui.pixel(0, 0), Some(BACKGROUND));
        assert_eq!(ui.pixel(79, 47), Some((200, 200, 200)));
    }

    #[test]
    fn test_clear_resets_pixels() {
        let mut ui = frontend();
        ui.draw_filled_rect(0.0, 0.0, 800.0, 480.0, Color::Gray(120));
        ui.clear_region(0.0, 0.0, 800.0, 480.0);
        assert_eq!(ui.pixel(10, 10), Some(BACKGROUND));
        assert_eq!(ui.pixel(80, 0), None);
    }

    #[test]
    fn test_dialog_signals() {
        let mut ui = frontend();
        ui.show_start_overlay();
        assert_eq!(ui.dialog(), Some(&Dialog::Start));
        ui.hide_end_overlay();
        assert_eq!(ui.dialog(), Some(&Dialog::Start));
        ui.hide_start_overlay();
        assert_eq!(ui.dialog(), None);

        ui.show_end_overlay("00:01:000", "00:02:000");
        ui.hide_start_overlay();
        assert!(matches!(ui.dialog(), Some(Dialog::End { .. })));
        ui.hide_end_overlay();
        assert_eq!(ui.dialog(), None);
    }

    #[test]
    fn test_present_writes_dialog_text() {
        let mut ui = frontend();
        ui.set_status("00:03:100");
        ui.show_end_overlay("00:03:100", "01:05:432");
        let mut out = Vec::new();
        ui.present(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Best   01:05:432"));
        assert!(text.contains("00:03:100"));
    }

    #[test]
    fn test_resize_requests_redraw() {
        let mut ui = frontend();
        ui.present(&mut Vec::new()).unwrap();
        assert!(!ui.needs_redraw());

        // Nothing ticks while the end dialog is up; a resize alone must repaint
        ui.resize(40, 12);
        assert!(ui.needs_redraw());
        ui.present(&mut Vec::new()).unwrap();
        assert!(!ui.needs_redraw());

        ui.set_status("");
        assert!(!ui.needs_redraw());
        ui.show_end_overlay("00:01:000", "00:01:000");
        assert!(ui.needs_redraw());
    }

    #[test]
    fn test_screen_guard_restores_on_drop() {
        let mut out = Vec::new();
        drop(ScreenGuard { out: &mut out });
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("\x1b[?1049l"));
        assert!(text.contains("\x1b[?25h"));
    }

    #[test]
    fn test_screen_guard_restores_while_unwinding() {
        let mut out = Vec::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = ScreenGuard { out: &mut out };
            panic!("frame failed");
        }));
        assert!(result.is_err());
        assert!(String::from_utf8_lossy(&out).contains("\x1b[?1049l"));
    }
}
