//! Xlib wrapper functions
//!
//! [`Xlib`] owns the loaded library and its resolved symbol table. Every
//! wrapper is a method on it: arguments are marshalled, the bound symbol is
//! called synchronously, and the native result comes back unchanged or
//! retagged as a handle type.
//!
//! # Safety
//!
//! Wrappers that take a [`Display`](crate::Display) are `unsafe`: the handle
//! must come from [`Xlib::open_display`] on the same instance, must not be
//! null, and must not have been passed to [`Xlib::close_display`]. A single
//! connection must not be used from several threads at once. Other handles
//! must belong to that connection. None of this is checked here; Xlib itself
//! gives no validation.

#![allow(clippy::missing_safety_doc)]

mod display;
mod event;
mod window;

pub use display::resolve_display_name;
pub use window::Geometry;

use crate::ffi::XlibFns;
use crate::loader::LoadedLibrary;
use crate::{Error, Result};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// A loaded Xlib.
///
/// Construct it once with [`Xlib::open`] and pass it by reference to whatever
/// needs to talk to the X server. Dropping it unloads the library, so every
/// handle obtained through it becomes unusable.
pub struct Xlib {
    pub(crate) fns: XlibFns,
    // Keeps the resolved function pointers valid. `None` for tables built
    // from a caller-provided resolver.
    pub(crate) library: Option<LoadedLibrary>,
}

impl Xlib {
    /// Resolved function table, for calls not wrapped here.
    pub fn fns(&self) -> &XlibFns {
        &self.fns
    }

    /// Name the library was opened by, if it came from the dynamic loader.
    pub fn library_name(&self) -> Option<&str> {
        self.library.as_ref().map(|lib| lib.name())
    }
}

impl std::fmt::Debug for Xlib {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Xlib")
            .field("library", &self.library_name())
            .finish_non_exhaustive()
    }
}

/// Encode a string argument as a NUL-terminated C string (`len + 1` bytes).
pub fn encode_c_string(value: &str, what: &'static str) -> Result<CString> {
    CString::new(value).map_err(|_| Error::InteriorNul { what })
}

/// Copy a C string returned by Xlib. Xlib keeps ownership of the memory.
unsafe fn copy_c_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_appends_terminator() {
        for name in ["", ":0", "localhost:10.0", "~ !\"#$%&'()*+,-./9:;<=>?@Z[\\]^_`z{|}"] {
            let encoded = encode_c_string(name, "display name").unwrap();
            let bytes = encoded.as_bytes_with_nul();
            assert_eq!(bytes.len(), name.len() + 1);
            assert_eq!(bytes[name.len()], 0);
            assert_eq!(&bytes[..name.len()], name.as_bytes());
        }
    }

    #[test]
    fn test_encode_rejects_interior_nul() {
        let err = encode_c_string(":0\0:1", "display name").unwrap_err();
        assert!(matches!(err, Error::InteriorNul { what: "display name" }));
    }

    #[test]
    fn test_copy_c_string() {
        let vendor = CString::new("The X.Org Foundation").unwrap();
        unsafe {
            assert_eq!(
                copy_c_string(vendor.as_ptr()).as_deref(),
                Some("The X.Org Foundation")
            );
            assert_eq!(copy_c_string(std::ptr::null()), None);
        }
    }
}
