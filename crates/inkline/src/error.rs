//! Error type for console writing.

use std::io;

use inkline_codec::UnknownColorName;
use thiserror::Error;

/// Error returned by [`write`](crate::write) / [`write_line`](crate::write_line)
/// and the [`Console`](crate::Console) methods.
///
/// Whatever the failure, the terminal colors that were active before the call
/// have already been restored by the time this propagates.
#[derive(Debug, Error)]
pub enum WriteError {
    /// A directive named a color outside the fixed palette.
    #[error(transparent)]
    UnknownColor(#[from] UnknownColorName),

    /// The underlying writer failed.
    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),
}
