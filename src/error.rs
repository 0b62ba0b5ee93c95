//! Crate error type
//!
//! Only failures that happen on this side of the boundary are errors: the
//! library or a symbol cannot be found, or an argument cannot be marshalled.
//! Native sentinels (null handles, zero status) are returned as values.

use std::fmt;

/// Result type for binding operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// None of the candidate shared libraries could be opened. One
    /// `(candidate, reason)` entry per library tried, in order.
    LibraryNotFound { attempts: Vec<(String, String)> },
    /// The library opened but lacks declared symbols. Loading is
    /// all-or-nothing, so this fails the whole binding.
    MissingSymbols {
        library: String,
        symbols: Vec<&'static str>,
    },
    /// A string argument contains an interior NUL and cannot be passed as a
    /// C string.
    InteriorNul { what: &'static str },
    /// Waiting for readiness on the connection failed.
    #[cfg(unix)]
    Poll(nix::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LibraryNotFound { attempts } => {
                if attempts.is_empty() {
                    return write!(f, "could not load Xlib: no candidate libraries");
                }
                write!(f, "could not load Xlib")?;
                for (i, (name, reason)) in attempts.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{}{} ({})", sep, name, reason)?;
                }
                Ok(())
            }
            Error::MissingSymbols { library, symbols } => {
                write!(
                    f,
                    "{} is missing {} symbol(s): {}",
                    library,
                    symbols.len(),
                    symbols.join(", ")
                )
            }
            Error::InteriorNul { what } => write!(f, "{} contains an interior NUL byte", what),
            #[cfg(unix)]
            Error::Poll(e) => write!(f, "poll on display connection failed: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(unix)]
            Error::Poll(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(unix)]
impl From<nix::Error> for Error {
    fn from(e: nix::Error) -> Self {
        Error::Poll(e)
    }
}
