//! xlib-bind - Runtime-loaded Xlib bindings
//!
//! This library opens libX11 at runtime, binds a fixed table of Xlib entry
//! points, and exposes each one as a thin wrapper with typed handles.
//!
//! ```no_run
//! use xlib_bind::Xlib;
//!
//! let xlib = Xlib::open().expect("libX11 not available");
//! let display = xlib.open_display(None).unwrap();
//! if !display.is_null() {
//!     unsafe {
//!         let screen = xlib.default_screen(display);
//!         let root = xlib.root_window(display, screen);
//!         println!("root window {}", root);
//!         xlib.close_display(display);
//!     }
//! }
//! ```

pub mod attributes;
pub mod error;
pub mod event;
pub mod ffi;
pub mod handles;
pub mod loader;
pub mod xlib;

pub use attributes::WindowAttributes;
pub use error::{Error, Result};
pub use event::XEvent;
pub use ffi::{Signature, TypeTag, SYMBOLS};
pub use handles::{Atom, Colormap, Display, Gc, Screen, Visual, Window, XID};
pub use loader::{LoadConfig, SymbolResolver};
pub use xlib::{encode_c_string, resolve_display_name, Geometry, Xlib};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
