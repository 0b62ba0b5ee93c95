//! Opaque native handles
//!
//! Every value Xlib hands back is an opaque token. These newtypes keep the
//! bit representation of the native value untouched while making each kind of
//! token a distinct Rust type, so a colormap cannot be passed where a window
//! is expected. Nothing here dereferences a handle.

use crate::ffi::{XDisplay, XGc, XScreen, XVisual};
use std::fmt;
use std::os::raw::c_ulong;
use std::ptr;

/// X resource ID as Xlib sees it (`unsigned long` on LP64).
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct XID(pub c_ulong);

impl XID {
    pub const NONE: XID = XID(0);

    pub fn new(id: c_ulong) -> Self {
        XID(id)
    }

    pub fn get(&self) -> c_ulong {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for XID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

macro_rules! xid_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(pub XID);

        impl $name {
            pub const NONE: $name = $name(XID::NONE);

            pub fn new(id: c_ulong) -> Self {
                $name(XID::new(id))
            }

            pub fn id(&self) -> XID {
                self.0
            }

            pub fn raw(&self) -> c_ulong {
                self.0.get()
            }

            pub fn is_null(&self) -> bool {
                self.0.is_none()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

macro_rules! pointer_handle {
    ($(#[$meta:meta])* $name:ident => $native:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(*mut $native);

        impl $name {
            pub const NULL: $name = $name(ptr::null_mut());

            /// Wrap a raw pointer obtained from Xlib.
            pub fn from_ptr(ptr: *mut $native) -> Self {
                $name(ptr)
            }

            pub fn as_ptr(&self) -> *mut $native {
                self.0
            }

            pub fn is_null(&self) -> bool {
                self.0.is_null()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:p}", self.0)
            }
        }
    };
}

pointer_handle! {
    /// An open connection to an X server (`Display *`).
    ///
    /// Created by [`Xlib::open_display`](crate::Xlib::open_display) and owned
    /// by the caller until passed to `close_display`. Xlib forbids using one
    /// connection from several threads without external locking; the raw
    /// pointer keeps this type `!Send` and `!Sync`.
    Display => XDisplay
}

pointer_handle! {
    /// Screen descriptor (`Screen *`), owned by the display connection.
    Screen => XScreen
}

pointer_handle! {
    /// Visual descriptor (`Visual *`), owned by the display connection.
    Visual => XVisual
}

pointer_handle! {
    /// Graphics context (`GC`). The default GC of a screen must never be freed.
    Gc => XGc
}

xid_handle! {
    /// Server-side window identifier.
    Window
}

xid_handle! {
    /// Server-side colormap identifier.
    Colormap
}

xid_handle! {
    /// Interned atom.
    Atom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xid_display_format() {
        assert_eq!(XID::new(0x1a).to_string(), "0x0000001a");
        assert_eq!(Window::new(0x400001).to_string(), "0x00400001");
    }

    #[test]
    fn test_none_handles() {
        assert!(Window::NONE.is_null());
        assert!(Colormap::default().is_null());
        assert!(!Atom::new(42).is_null());
        assert!(Display::NULL.is_null());
        assert!(Gc::NULL.as_ptr().is_null());
    }

    #[test]
    fn test_handles_keep_bits() {
        let window = Window::new(0xdead_beef);
        assert_eq!(window.raw(), 0xdead_beef);
        assert_eq!(window.id(), XID(0xdead_beef));

        let raw = 0x1000 as *mut XDisplay;
        assert_eq!(Display::from_ptr(raw).as_ptr(), raw);
    }
}
