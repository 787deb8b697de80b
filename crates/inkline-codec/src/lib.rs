//! Wire codec for inline-colored console templates.
//!
//! This crate turns a [`Template`] — an ordered sequence of literal text and
//! color-annotated substitutions — into one flat wire string, and parses that
//! string back into discrete [`Segment`]s for sequential rendering. Encoding
//! frames each substitution between occurrences of a reserved [`SENTINEL`]
//! character; decoding is a single forward pass that demultiplexes literal
//! runs from directive/value pairs without any look-back.
//!
//! # Example
//!
//! ```rust
//! use inkline_codec::{decode, ColorSpec, Color, Segment, Template};
//!
//! let template = Template::new()
//!     .text("status: ")
//!     .styled("green", "ok")
//!     .text(" (")
//!     .value(3)
//!     .text(" checks)");
//!
//! let wire = template.encode();
//! let segments = decode(&wire);
//!
//! assert_eq!(segments[0], Segment::Text("status: "));
//! assert_eq!(segments[1], Segment::Styled { directive: "green", text: "ok" });
//!
//! // Directives resolve separately, at render time.
//! let spec = ColorSpec::parse("green").unwrap();
//! assert_eq!(spec.foreground, Some(Color::Green));
//! assert_eq!(spec.background, None);
//! ```
//!
//! # Directive mini-language
//!
//! Each substitution may carry a directive string:
//!
//! - `""` — no color override
//! - `"<name>"` — foreground only
//! - `"<name1>:<name2>"` — foreground and background; either side may be
//!   blank, leaving that channel at the terminal default
//!
//! Color names are matched case-insensitively against the fixed 16-entry
//! terminal palette ([`Color`]). An unrecognized name is a caller error and
//! surfaces as [`UnknownColorName`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Reserved delimiter framing encoded fields in the wire stream.
///
/// U+FFFF is a Unicode noncharacter, so it never occurs in ordinary text.
/// It is a framing convention, not an escape mechanism: literal text,
/// directives, and stringified values must not contain it.
pub const SENTINEL: char = '\u{ffff}';

/// One of the sixteen standard terminal colors.
///
/// Lookup by name is case-insensitive; bright variants use the `bright_`
/// prefix (`bright_red`, `bright_white`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// The canonical lowercase name, as accepted by [`Color::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
            Color::BrightBlack => "bright_black",
            Color::BrightRed => "bright_red",
            Color::BrightGreen => "bright_green",
            Color::BrightYellow => "bright_yellow",
            Color::BrightBlue => "bright_blue",
            Color::BrightMagenta => "bright_magenta",
            Color::BrightCyan => "bright_cyan",
            Color::BrightWhite => "bright_white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A directive named a color that is not in the palette.
///
/// Carries the offending name verbatim (after trimming).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color name: {0:?}")]
pub struct UnknownColorName(pub String);

impl FromStr for Color {
    type Err = UnknownColorName;

    fn from_str(s: &str) -> Result<Self, UnknownColorName> {
        let name = s.trim();
        let color = match name.to_lowercase().as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright_black" => Color::BrightBlack,
            "bright_red" => Color::BrightRed,
            "bright_green" => Color::BrightGreen,
            "bright_yellow" => Color::BrightYellow,
            "bright_blue" => Color::BrightBlue,
            "bright_magenta" => Color::BrightMagenta,
            "bright_cyan" => Color::BrightCyan,
            "bright_white" => Color::BrightWhite,
            _ => return Err(UnknownColorName(name.to_string())),
        };
        Ok(color)
    }
}

/// Resolved foreground/background pair for one segment.
///
/// `None` on a channel means "leave the terminal default". The default
/// value has both channels absent, i.e. no color override at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorSpec {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl ColorSpec {
    /// Resolves a directive string.
    ///
    /// A blank directive yields the no-op spec. A directive containing `:`
    /// splits on the first occurrence into foreground and background names;
    /// either side may be blank. Anything after a second `:` folds into the
    /// background name and fails resolution there.
    pub fn parse(directive: &str) -> Result<Self, UnknownColorName> {
        if directive.trim().is_empty() {
            return Ok(ColorSpec::default());
        }
        match directive.split_once(':') {
            Some((fg, bg)) => Ok(ColorSpec {
                foreground: Self::channel(fg)?,
                background: Self::channel(bg)?,
            }),
            None => Ok(ColorSpec {
                foreground: Self::channel(directive)?,
                background: None,
            }),
        }
    }

    /// True if neither channel is set.
    pub fn is_none(&self) -> bool {
        self.foreground.is_none() && self.background.is_none()
    }

    fn channel(name: &str) -> Result<Option<Color>, UnknownColorName> {
        let name = name.trim();
        if name.is_empty() {
            Ok(None)
        } else {
            name.parse().map(Some)
        }
    }
}

impl fmt::Display for ColorSpec {
    /// Prints the directive form: `red`, `red:blue`, `:blue`, or nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.foreground, self.background) {
            (None, None) => Ok(()),
            (Some(fg), None) => write!(f, "{}", fg),
            (fg, Some(bg)) => {
                if let Some(fg) = fg {
                    write!(f, "{}", fg)?;
                }
                write!(f, ":{}", bg)
            }
        }
    }
}

/// One part of a [`Template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Literal text, copied to the wire unchanged.
    Literal(String),
    /// A substituted value with an optional color directive.
    Substitution {
        directive: Option<String>,
        value: String,
    },
}

/// An ordered sequence of literal text and color-annotated substitutions.
///
/// Built by chaining, read-only once handed to [`Template::encode`]:
///
/// ```rust
/// use inkline_codec::Template;
///
/// let t = Template::new()
///     .text("hello ")
///     .styled("red:white", "world")
///     .text("!");
/// assert_eq!(t.parts().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    parts: Vec<Part>,
}

impl Template {
    pub fn new() -> Self {
        Template::default()
    }

    /// Appends a literal text part.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Literal(text.into()));
        self
    }

    /// Appends a substitution with no color directive.
    pub fn value(mut self, value: impl fmt::Display) -> Self {
        self.parts.push(Part::Substitution {
            directive: None,
            value: value.to_string(),
        });
        self
    }

    /// Appends a substitution carrying a color directive
    /// (`"red"`, `"red:blue"`, `":blue"`, ...).
    pub fn styled(mut self, directive: impl Into<String>, value: impl fmt::Display) -> Self {
        self.parts.push(Part::Substitution {
            directive: Some(directive.into()),
            value: value.to_string(),
        });
        self
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Serializes the template into one flat wire string.
    ///
    /// Literal parts copy through verbatim. Each substitution becomes a
    /// marked region `SENTINEL directive SENTINEL value SENTINEL`, with an
    /// absent directive encoded as an empty field. No directive validation
    /// happens here; resolution is deferred to render time.
    pub fn encode(&self) -> String {
        let mut wire = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => wire.push_str(text),
                Part::Substitution { directive, value } => {
                    wire.push(SENTINEL);
                    if let Some(directive) = directive {
                        wire.push_str(directive);
                    }
                    wire.push(SENTINEL);
                    wire.push_str(value);
                    wire.push(SENTINEL);
                }
            }
        }
        wire
    }
}

/// One contiguous render unit recovered from the wire stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A literal run, rendered with the caller's current colors.
    Text(&'a str),
    /// A substituted value with its unresolved directive.
    Styled { directive: &'a str, text: &'a str },
}

/// Streaming decoder over a wire string.
///
/// A single forward pass with no look-back: literal runs are yielded up to
/// the next [`SENTINEL`]; a sentinel opens a marked region whose directive
/// and value fields run to the following two sentinels. Empty literal runs
/// between adjacent regions are skipped — they render nothing.
///
/// The decoder tolerates the one truncation the encoder can legally imply:
/// a stream that ends inside the value field still yields the final pair,
/// provided both directive and value are non-empty. A stream that ends
/// inside the directive field yields nothing for the dangling region.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    wire: &'a str,
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(wire: &'a str) -> Self {
        Decoder { wire, pos: 0 }
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if self.pos >= self.wire.len() {
            return None;
        }
        let remaining = &self.wire[self.pos..];
        match remaining.find(SENTINEL) {
            // No more regions: the rest is one literal run.
            None => {
                self.pos = self.wire.len();
                Some(Segment::Text(remaining))
            }
            // Literal run up to the next region.
            Some(idx) if idx > 0 => {
                self.pos += idx;
                Some(Segment::Text(&remaining[..idx]))
            }
            // At a region opener.
            Some(_) => {
                let rest = &remaining[SENTINEL.len_utf8()..];
                let Some(dir_end) = rest.find(SENTINEL) else {
                    // Ended mid-directive: dangling region, nothing to render.
                    self.pos = self.wire.len();
                    return None;
                };
                let directive = &rest[..dir_end];
                let value_and_tail = &rest[dir_end + SENTINEL.len_utf8()..];
                match value_and_tail.find(SENTINEL) {
                    Some(val_end) => {
                        let text = &value_and_tail[..val_end];
                        self.pos = self.wire.len() - value_and_tail.len()
                            + val_end
                            + SENTINEL.len_utf8();
                        Some(Segment::Styled { directive, text })
                    }
                    None => {
                        // Closing sentinel truncated: only a complete pair
                        // is rendered.
                        self.pos = self.wire.len();
                        if !directive.is_empty() && !value_and_tail.is_empty() {
                            Some(Segment::Styled {
                                directive,
                                text: value_and_tail,
                            })
                        } else {
                            None
                        }
                    }
                }
            }
        }
    }
}

/// Decodes a whole wire string into its segments.
pub fn decode(wire: &str) -> Vec<Segment<'_>> {
    Decoder::new(wire).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // Payload text that never contains the sentinel (it is a framing
    // convention, excluded by contract).
    fn payload() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?;'\"-]{0,40}"
    }

    fn nonempty_payload() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?;'\"-]{1,40}"
    }

    fn directive() -> impl Strategy<Value = String> {
        "[a-z_:]{0,20}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn literal_only_round_trip(text in nonempty_payload()) {
            let wire = Template::new().text(text.clone()).encode();
            prop_assert_eq!(decode(&wire), vec![Segment::Text(text.as_str())]);
        }

        #[test]
        fn single_substitution_round_trip(dir in directive(), value in payload()) {
            let wire = Template::new().styled(dir.clone(), value.clone()).encode();
            let segments = decode(&wire);
            prop_assert_eq!(
                segments,
                vec![Segment::Styled { directive: dir.as_str(), text: value.as_str() }]
            );
        }

        #[test]
        fn alternating_template_round_trip(
            pairs in prop::collection::vec(
                (nonempty_payload(), directive(), payload()),
                1..6,
            )
        ) {
            let mut template = Template::new();
            for (text, dir, value) in &pairs {
                template = template.text(text.clone()).styled(dir.clone(), value.clone());
            }
            let wire = template.encode();

            let mut expected = Vec::new();
            for (text, dir, value) in &pairs {
                expected.push(Segment::Text(text.as_str()));
                expected.push(Segment::Styled {
                    directive: dir.as_str(),
                    text: value.as_str(),
                });
            }
            prop_assert_eq!(decode(&wire), expected);
        }

        #[test]
        fn decoding_never_invents_sentinels(wire in "[a-zA-Z0-9 \u{ffff}]{0,60}") {
            for segment in Decoder::new(&wire) {
                match segment {
                    Segment::Text(t) => prop_assert!(!t.contains(SENTINEL)),
                    Segment::Styled { directive, text } => {
                        prop_assert!(!directive.contains(SENTINEL));
                        prop_assert!(!text.contains(SENTINEL));
                    }
                }
            }
        }
    }
}
