use crate::framebuffer::{FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Display is used to put the interpreter's frame on a screen. It should
/// abstract the implementation details, so a variety of kinds of screen would
/// work.
pub trait Display {
    /// draw one complete frame
    fn draw(&mut self, frame: &FrameBuffer) -> Result<(), io::Error>;
}

// store useful metadata about the terminal
struct Resolution(usize, usize);

impl Resolution {
    fn pixel_count(&self) -> usize {
        self.0 * self.1
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }

    /// canvas coordinates of every pixel that is `lit` (or every pixel that
    /// isn't); y is negated so row 0 is at the top of the canvas
    fn points_from_frame(&self, frame: &FrameBuffer, lit: bool) -> Vec<(f64, f64)> {
        let w = self.0;
        frame
            .cells()
            .iter()
            .take(self.pixel_count())
            .enumerate()
            .filter(|(_, on)| **on == lit)
            .map(|(i, _)| ((i % w) as f64, -1.0 * (i / w) as f64))
            .collect()
    }
}

/// monochrome display in a terminal, rendered using TUI and crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resolution: Resolution,
}

impl MonoTermDisplay {
    pub fn new() -> Result<MonoTermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        Ok(MonoTermDisplay {
            terminal,
            resolution: Resolution(DISPLAY_WIDTH, DISPLAY_HEIGHT),
        })
    }
}

impl Drop for MonoTermDisplay {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
    }
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, frame: &FrameBuffer) -> Result<(), io::Error> {
        let resolution = &self.resolution;
        let off = resolution.points_from_frame(frame, false);
        let on = resolution.points_from_frame(frame, true);

        // for now this assumes a 1:1 ratio between terminal, chip8 and the
        // internal TUI canvas
        self.terminal.draw(|f| {
            let size = Rect::new(0, 0, 2 + resolution.0 as u16, 2 + resolution.1 as u16);

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(resolution.x_bounds())
                .y_bounds(resolution.y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &off,
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &on,
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }
}

/// useful for testing non-display routines; remembers what it was shown
#[derive(Default)]
pub struct DummyDisplay {
    pub frames_drawn: usize,
    pub last_frame: Option<FrameBuffer>,
}

impl DummyDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, frame: &FrameBuffer) -> Result<(), io::Error> {
        self.frames_drawn += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_count() {
        let r = Resolution(64, 32);
        assert_eq!(r.pixel_count(), 2048)
    }

    #[test]
    fn test_x_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.x_bounds(), [0.0, 63.0]);
    }

    #[test]
    fn test_y_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.y_bounds(), [-31.0, 0.0]);
    }

    #[test]
    fn test_points_blank_frame() {
        let r = Resolution(64, 32);
        let frame = FrameBuffer::new();
        assert!(r.points_from_frame(&frame, true).is_empty());
        assert_eq!(r.points_from_frame(&frame, false).len(), 2048);
    }

    #[test]
    fn test_points_position() {
        let r = Resolution(64, 32);
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(3, 2, &[0x80], true);
        assert_eq!(r.points_from_frame(&frame, true), vec![(3.0, -2.0)]);
        assert_eq!(r.points_from_frame(&frame, false).len(), 2047);
    }

    #[test]
    fn test_dummy_display_records() -> Result<(), io::Error> {
        let mut d = DummyDisplay::new();
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 0, &[0xff], true);
        d.draw(&frame)?;
        assert_eq!(d.frames_drawn, 1);
        assert_eq!(d.last_frame, Some(frame));
        Ok(())
    }
}
