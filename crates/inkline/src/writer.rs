//! Output device abstraction and the ANSI backend.
//!
//! The renderer only needs five capabilities from its output device: query
//! the current foreground/background override, switch either channel, and
//! write text. [`ConsoleWrite`] captures exactly that seam; [`AnsiWriter`]
//! implements it for any [`io::Write`] by emitting SGR escape sequences.

use std::io;
use std::io::Write as _;

use inkline_codec::Color;

/// The capability set the renderer depends on.
///
/// `None` on a channel means the terminal's default color — there is no
/// portable way to read the real active colors on an ANSI terminal, so the
/// device tracks overrides instead, and "restore" means re-applying the
/// overrides that were in effect at entry.
pub trait ConsoleWrite {
    /// The current foreground override, if any.
    fn foreground(&self) -> Option<Color>;

    /// The current background override, if any.
    fn background(&self) -> Option<Color>;

    /// Switches the foreground; `None` selects the terminal default.
    fn set_foreground(&mut self, color: Option<Color>) -> io::Result<()>;

    /// Switches the background; `None` selects the terminal default.
    fn set_background(&mut self, color: Option<Color>) -> io::Result<()>;

    /// Writes text in the currently selected colors.
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Flushes buffered output. Defaults to a no-op.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: ?Sized + ConsoleWrite> ConsoleWrite for &mut T {
    fn foreground(&self) -> Option<Color> {
        (**self).foreground()
    }
    fn background(&self) -> Option<Color> {
        (**self).background()
    }
    fn set_foreground(&mut self, color: Option<Color>) -> io::Result<()> {
        (**self).set_foreground(color)
    }
    fn set_background(&mut self, color: Option<Color>) -> io::Result<()> {
        (**self).set_background(color)
    }
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        (**self).write_str(text)
    }
    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<T: ?Sized + ConsoleWrite> ConsoleWrite for Box<T> {
    fn foreground(&self) -> Option<Color> {
        (**self).foreground()
    }
    fn background(&self) -> Option<Color> {
        (**self).background()
    }
    fn set_foreground(&mut self, color: Option<Color>) -> io::Result<()> {
        (**self).set_foreground(color)
    }
    fn set_background(&mut self, color: Option<Color>) -> io::Result<()> {
        (**self).set_background(color)
    }
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        (**self).write_str(text)
    }
    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// [`ConsoleWrite`] backend that emits ANSI SGR sequences.
///
/// Tracks the selected override per channel and only emits an escape when a
/// switch actually changes it. With color disabled the writer passes text
/// through untouched while still tracking state, so the renderer behaves
/// identically either way.
#[derive(Debug)]
pub struct AnsiWriter<W> {
    inner: W,
    color_enabled: bool,
    foreground: Option<Color>,
    background: Option<Color>,
}

impl<W: io::Write> AnsiWriter<W> {
    /// Wraps `inner` with color emission on.
    pub fn new(inner: W) -> Self {
        Self::with_color_enabled(inner, true)
    }

    /// Wraps `inner`, emitting escapes only when `color_enabled` is true.
    pub fn with_color_enabled(inner: W, color_enabled: bool) -> Self {
        AnsiWriter {
            inner,
            color_enabled,
            foreground: None,
            background: None,
        }
    }

    /// Unwraps the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn sgr(&mut self, code: u8) -> io::Result<()> {
        write!(self.inner, "\x1b[{}m", code)
    }
}

/// Zero-based palette index: 0-7 base, 8-15 bright.
fn palette_index(color: Color) -> u8 {
    match color {
        Color::Black => 0,
        Color::Red => 1,
        Color::Green => 2,
        Color::Yellow => 3,
        Color::Blue => 4,
        Color::Magenta => 5,
        Color::Cyan => 6,
        Color::White => 7,
        Color::BrightBlack => 8,
        Color::BrightRed => 9,
        Color::BrightGreen => 10,
        Color::BrightYellow => 11,
        Color::BrightBlue => 12,
        Color::BrightMagenta => 13,
        Color::BrightCyan => 14,
        Color::BrightWhite => 15,
    }
}

/// SGR code selecting `color` as foreground; 39 resets to the default.
fn foreground_code(color: Option<Color>) -> u8 {
    match color.map(palette_index) {
        None => 39,
        Some(i) if i < 8 => 30 + i,
        Some(i) => 90 + (i - 8),
    }
}

/// SGR code selecting `color` as background; 49 resets to the default.
fn background_code(color: Option<Color>) -> u8 {
    match color.map(palette_index) {
        None => 49,
        Some(i) if i < 8 => 40 + i,
        Some(i) => 100 + (i - 8),
    }
}

impl<W: io::Write> ConsoleWrite for AnsiWriter<W> {
    fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    fn background(&self) -> Option<Color> {
        self.background
    }

    fn set_foreground(&mut self, color: Option<Color>) -> io::Result<()> {
        if color == self.foreground {
            return Ok(());
        }
        self.foreground = color;
        if self.color_enabled {
            self.sgr(foreground_code(color))?;
        }
        Ok(())
    }

    fn set_background(&mut self, color: Option<Color>) -> io::Result<()> {
        if color == self.background {
            return Ok(());
        }
        self.background = color;
        if self.color_enabled {
            self.sgr(background_code(color))?;
        }
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer() -> AnsiWriter<Vec<u8>> {
        AnsiWriter::new(Vec::new())
    }

    fn output(w: AnsiWriter<Vec<u8>>) -> String {
        String::from_utf8(w.into_inner()).unwrap()
    }

    #[test]
    fn base_foreground_uses_30_range() {
        let mut w = writer();
        w.set_foreground(Some(Color::Red)).unwrap();
        assert_eq!(output(w), "\x1b[31m");
    }

    #[test]
    fn bright_foreground_uses_90_range() {
        let mut w = writer();
        w.set_foreground(Some(Color::BrightRed)).unwrap();
        assert_eq!(output(w), "\x1b[91m");
    }

    #[test]
    fn base_background_uses_40_range() {
        let mut w = writer();
        w.set_background(Some(Color::Blue)).unwrap();
        assert_eq!(output(w), "\x1b[44m");
    }

    #[test]
    fn bright_background_uses_100_range() {
        let mut w = writer();
        w.set_background(Some(Color::BrightWhite)).unwrap();
        assert_eq!(output(w), "\x1b[107m");
    }

    #[test]
    fn clearing_emits_default_codes() {
        let mut w = writer();
        w.set_foreground(Some(Color::Green)).unwrap();
        w.set_background(Some(Color::Black)).unwrap();
        w.set_foreground(None).unwrap();
        w.set_background(None).unwrap();
        assert_eq!(output(w), "\x1b[32m\x1b[40m\x1b[39m\x1b[49m");
    }

    #[test]
    fn redundant_switches_emit_nothing() {
        let mut w = writer();
        w.set_foreground(None).unwrap();
        w.set_foreground(Some(Color::Cyan)).unwrap();
        w.set_foreground(Some(Color::Cyan)).unwrap();
        assert_eq!(output(w), "\x1b[36m");
    }

    #[test]
    fn disabled_writer_tracks_state_without_escapes() {
        let mut w = AnsiWriter::with_color_enabled(Vec::new(), false);
        w.set_foreground(Some(Color::Red)).unwrap();
        w.write_str("plain").unwrap();
        assert_eq!(w.foreground(), Some(Color::Red));
        assert_eq!(output(w), "plain");
    }

    #[test]
    fn text_is_passed_through_verbatim() {
        let mut w = writer();
        w.write_str("héllo ✓").unwrap();
        assert_eq!(output(w), "héllo ✓");
    }
}
