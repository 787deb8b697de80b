//! Locked console and the process-global `write` / `write_line` surface.

use std::io::{self, Stdout};
use std::sync::{Mutex, MutexGuard, PoisonError};

use inkline_codec::Template;
use once_cell::sync::Lazy;

use crate::error::WriteError;
use crate::render::render;
use crate::writer::{AnsiWriter, ConsoleWrite};

/// A console that renders templates atomically.
///
/// The writer's color state is shared mutable state: interleaving two
/// concurrent set-color/write/restore sequences would visibly corrupt
/// output. Every call therefore runs its whole encode-decode-render
/// sequence — capture entry colors, every segment switch, restoration —
/// under one mutex acquisition.
pub struct Console<W> {
    writer: Mutex<W>,
}

impl<W: ConsoleWrite> Console<W> {
    pub fn new(writer: W) -> Self {
        Console {
            writer: Mutex::new(writer),
        }
    }

    /// Renders `template` as one atomic write.
    ///
    /// Entry colors are restored before returning, whether rendering
    /// succeeded or failed.
    pub fn write(&self, template: &Template) -> Result<(), WriteError> {
        let mut writer = self.lock();
        render(&mut *writer, &template.encode())?;
        writer.flush()?;
        Ok(())
    }

    /// Like [`Console::write`], then emits a line terminator inside the
    /// same critical section. A failed render emits no terminator.
    pub fn write_line(&self, template: &Template) -> Result<(), WriteError> {
        let mut writer = self.lock();
        render(&mut *writer, &template.encode())?;
        writer.write_str("\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Consumes the console and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        // A poisoned lock only means a previous holder panicked; the
        // renderer restores colors on every path, so the writer state is
        // still consistent.
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

static STDOUT: Lazy<Console<AnsiWriter<Stdout>>> = Lazy::new(|| {
    Console::new(AnsiWriter::with_color_enabled(
        io::stdout(),
        console::colors_enabled(),
    ))
});

/// Renders `template` to stdout as one atomic write.
pub fn write(template: &Template) -> Result<(), WriteError> {
    STDOUT.write(template)
}

/// Renders `template` to stdout followed by a newline, as one atomic write.
pub fn write_line(template: &Template) -> Result<(), WriteError> {
    STDOUT.write_line(template)
}
