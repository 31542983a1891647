use super::canvas::Canvas;
use crate::color::Color;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

const UPPER_HALF_BLOCK: char = '▀';

/// Writes canvases to a terminal, two pixels per cell.
///
/// Each cell prints an upper half block: the foreground color is the top
/// pixel and the background color the bottom one.
pub struct TerminalPresenter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Draws `canvas` with its top left corner at cell `(column, row)`.
    pub fn present(&mut self, canvas: &Canvas, column: u16, row: u16) -> Result<(), RenderError> {
        for (offset, (top, bottom)) in canvas.row_pairs().enumerate() {
            let line = row.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
            queue!(self.writer, MoveTo(column, line))?;
            self.write_cells(canvas, top, bottom)?;
        }
        queue!(self.writer, ResetColor)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Writes `canvas` as plain lines at the cursor, for output that is not a
    /// full screen such as piped previews.
    pub fn write_lines(&mut self, canvas: &Canvas) -> Result<(), RenderError> {
        for (top, bottom) in canvas.row_pairs() {
            self.write_cells(canvas, top, bottom)?;
            queue!(self.writer, ResetColor, Print("\r\n"))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_cells(&mut self, canvas: &Canvas, top: &[Color], bottom: Option<&[Color]>) -> io::Result<()> {
        let mut current: Option<(Color, Color)> = None;
        for (index, upper) in top.iter().enumerate() {
            let lower = bottom.and_then(|row| row.get(index)).copied().unwrap_or(canvas.background());
            let colors = (*upper, lower);
            if current != Some(colors) {
                let (foreground, background) = (terminal_color(*upper), terminal_color(lower));
                queue!(self.writer, SetForegroundColor(foreground), SetBackgroundColor(background))?;
                current = Some(colors);
            }
            queue!(self.writer, Print(UPPER_HALF_BLOCK))?;
        }
        Ok(())
    }
}

fn terminal_color(color: Color) -> style::Color {
    style::Color::Rgb { r: color.r, g: color.g, b: color.b }
}

/// Errors that can occur when presenting frames
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
