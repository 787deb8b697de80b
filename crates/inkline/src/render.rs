//! Wire-stream rendering with guaranteed color restoration.

use inkline_codec::{Color, ColorSpec, Decoder, Segment};

use crate::error::WriteError;
use crate::writer::ConsoleWrite;

/// Renders one wire stream to `writer`.
///
/// The colors in effect at entry are captured first and re-applied after the
/// stream — on success and on every error path — so no call leaks color
/// state to whatever is written next. Each segment's colors are computed
/// independently from its own directive plus the entry colors; nothing is
/// inherited from the previous segment.
pub(crate) fn render<W: ConsoleWrite>(writer: &mut W, wire: &str) -> Result<(), WriteError> {
    let entry_fg = writer.foreground();
    let entry_bg = writer.background();

    let rendered = render_segments(writer, wire, entry_fg, entry_bg);
    let restored = writer
        .set_foreground(entry_fg)
        .and_then(|_| writer.set_background(entry_bg));

    rendered?;
    restored?;
    Ok(())
}

fn render_segments<W: ConsoleWrite>(
    writer: &mut W,
    wire: &str,
    entry_fg: Option<Color>,
    entry_bg: Option<Color>,
) -> Result<(), WriteError> {
    for segment in Decoder::new(wire) {
        match segment {
            Segment::Text(text) => {
                writer.set_foreground(entry_fg)?;
                writer.set_background(entry_bg)?;
                writer.write_str(text)?;
            }
            Segment::Styled { directive, text } => {
                let spec = ColorSpec::parse(directive)?;
                writer.set_foreground(spec.foreground.or(entry_fg))?;
                writer.set_background(spec.background.or(entry_bg))?;
                writer.write_str(text)?;
            }
        }
    }
    Ok(())
}
