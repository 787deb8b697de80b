//! # Inkline - Inline-Colored Console Writing
//!
//! Inkline lets you write console text where color directives travel inline
//! with the values they color, instead of separate set-color/write/reset
//! calls. A [`Template`] holds literal text and color-annotated
//! substitutions; one call encodes it, renders it segment by segment, and
//! restores the terminal's prior colors — atomically with respect to
//! concurrent writers.
//!
//! ## Quick Start
//!
//! ```rust
//! use inkline::Template;
//!
//! let template = Template::new()
//!     .text("build ")
//!     .styled("green", "passed")
//!     .text(" in ")
//!     .styled("cyan:black", "2.4s");
//!
//! inkline::write_line(&template).unwrap();
//! ```
//!
//! ## Directives
//!
//! Each substitution may carry a directive: `"red"` colors the foreground,
//! `"red:blue"` colors foreground and background, `":blue"` only the
//! background. Names are case-insensitive; the palette is the fixed set of
//! sixteen terminal colors ([`Color`]). An unknown name fails the call with
//! [`WriteError::UnknownColor`] — after the previous colors have been
//! restored.
//!
//! ## Guarantees
//!
//! - No color leakage: the foreground/background in effect before a call
//!   are re-applied on every exit path, success or error.
//! - Atomicity: a process-wide lock spans the whole render, so concurrent
//!   calls never interleave their color switches and writes.
//! - Capability aware: escapes are only emitted when the terminal supports
//!   color (via [`console::colors_enabled`]).
//!
//! For a custom output device, implement [`ConsoleWrite`] and wrap it in a
//! [`Console`]. The wire format itself lives in the `inkline-codec` crate
//! and is re-exported here.

mod console;
mod error;
mod render;
mod writer;

pub use console::{write, write_line, Console};
pub use error::WriteError;
pub use inkline_codec::{
    decode, Color, ColorSpec, Decoder, Part, Segment, Template, UnknownColorName,
};
pub use writer::{AnsiWriter, ConsoleWrite};
