/// Presents canvas frames on an ANSI terminal
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use wirespin_core::{Canvas, Glyphs};

/// Writes frames to a terminal-like writer
pub struct TerminalRenderer {
    glyphs: Glyphs,
}

impl TerminalRenderer {
    pub fn new(glyphs: Glyphs) -> Self {
        Self { glyphs }
    }

    /// Home the cursor and clear the screen
    pub fn clear_screen<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        queue!(writer, MoveTo(0, 0), Clear(ClearType::All))
    }

    /// Write the canvas grid and flush
    pub fn present<W: Write>(&self, writer: &mut W, canvas: &Canvas) -> io::Result<()> {
        canvas.draw(writer, &self.glyphs)?;
        writer.flush()
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(Glyphs::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_screen_sequence() {
        let renderer = TerminalRenderer::default();
        let mut out = Vec::new();
        renderer.clear_screen(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[2J"));
        assert!(text.starts_with("\x1b[1;1H"));
    }

    #[test]
    fn test_present_grid() {
        let renderer = TerminalRenderer::new(Glyphs::new('#', '.'));
        let mut canvas = Canvas::new(2, 2).unwrap();
        canvas.plot(1, 0);

        let mut out = Vec::new();
        renderer.present(&mut out, &canvas).unwrap();
        assert_eq!(out, b".#\n..\n");
    }
}
