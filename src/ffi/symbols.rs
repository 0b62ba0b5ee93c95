//! Xlib symbol table
//!
//! One declaration per bound entry point, using the LP64 signatures from
//! `<X11/Xlib.h>`. The macro expands each declaration into:
//! - a row of [`SYMBOLS`], the static table of names and type tags,
//! - a typed field of [`XlibFns`], the resolved function table,
//! - (tests only) a zero-returning stub with the same signature.
//!
//! A row that disagrees with the real C prototype is undefined behavior at
//! call time, not an error, which is why the live tests exercise the table
//! against the real library.

use super::{NativeType, Signature, XDisplay, XGc, XScreen, XVisual};
use crate::attributes::XSetWindowAttributes;
use crate::event::XEvent;
use crate::loader::SymbolResolver;
use crate::{Error, Result};
use std::os::raw::{c_char, c_int, c_long, c_uint, c_ulong, c_void};

macro_rules! xlib_symbols {
    ($(
        $(#[$doc:meta])*
        fn $name:ident($($arg:ident: $ty:ty),* $(,)?) -> $ret:ty;
    )*) => {
        /// Every bound native entry point with its declared signature, in
        /// declaration order.
        pub static SYMBOLS: &[Signature] = &[
            $(Signature {
                name: stringify!($name),
                params: &[$(<$ty as NativeType>::TAG),*],
                result: <$ret as NativeType>::TAG,
            },)*
        ];

        /// Resolved entry points.
        ///
        /// The pointers stay valid only while the library they were resolved
        /// from stays loaded; [`Xlib`](crate::Xlib) owns both.
        #[allow(non_snake_case)]
        pub struct XlibFns {
            $(
                $(#[$doc])*
                pub $name: unsafe extern "C" fn($($ty),*) -> $ret,
            )*
        }

        impl XlibFns {
            /// Resolve every symbol through `resolver`. All-or-nothing: the
            /// error lists every symbol that could not be found.
            ///
            /// # Safety
            /// Each address returned by the resolver must point to a function
            /// with exactly the declared C signature.
            #[allow(non_snake_case)]
            pub(crate) unsafe fn resolve<R: SymbolResolver + ?Sized>(resolver: &R) -> Result<XlibFns> {
                $(
                    let $name = resolver
                        .resolve(stringify!($name))
                        .filter(|addr| !addr.is_null());
                )*

                let missing: Vec<&'static str> = [$((stringify!($name), $name.is_some()),)*]
                    .iter()
                    .filter(|(_, found)| !found)
                    .map(|(name, _)| *name)
                    .collect();

                let ($(Some($name),)*) = ($($name,)*) else {
                    return Err(Error::MissingSymbols {
                        library: resolver.describe(),
                        symbols: missing,
                    });
                };

                Ok(XlibFns {
                    $($name: std::mem::transmute::<*const c_void, unsafe extern "C" fn($($ty),*) -> $ret>($name),)*
                })
            }
        }

        /// Stand-ins for every symbol, returning all-zero values (null
        /// pointers, `None` XIDs, zero status).
        #[cfg(test)]
        #[allow(non_snake_case)]
        pub(crate) mod zeroed {
            use super::*;

            $(
                pub(crate) unsafe extern "C" fn $name($(_: $ty),*) -> $ret {
                    std::mem::zeroed()
                }
            )*

            pub(crate) fn table() -> Vec<(&'static str, *const c_void)> {
                vec![$((stringify!($name), $name as *const c_void),)*]
            }
        }
    };
}

xlib_symbols! {
    // Connection
    fn XOpenDisplay(display_name: *const c_char) -> *mut XDisplay;
    fn XCloseDisplay(display: *mut XDisplay) -> c_int;
    fn XDisplayString(display: *mut XDisplay) -> *mut c_char;

    // Display and screen queries
    fn XAllPlanes() -> c_ulong;
    fn XBlackPixel(display: *mut XDisplay, screen_number: c_int) -> c_ulong;
    fn XWhitePixel(display: *mut XDisplay, screen_number: c_int) -> c_ulong;
    fn XConnectionNumber(display: *mut XDisplay) -> c_int;
    fn XDefaultColormap(display: *mut XDisplay, screen_number: c_int) -> c_ulong;
    fn XDefaultDepth(display: *mut XDisplay, screen_number: c_int) -> c_int;
    /// Returns an array the caller must release with `XFree`.
    fn XListDepths(display: *mut XDisplay, screen_number: c_int, count_return: *mut c_int) -> *mut c_int;
    fn XDefaultGC(display: *mut XDisplay, screen_number: c_int) -> *mut XGc;
    fn XDefaultRootWindow(display: *mut XDisplay) -> c_ulong;
    fn XDefaultScreenOfDisplay(display: *mut XDisplay) -> *mut XScreen;
    fn XScreenOfDisplay(display: *mut XDisplay, screen_number: c_int) -> *mut XScreen;
    fn XDefaultScreen(display: *mut XDisplay) -> c_int;
    fn XDefaultVisual(display: *mut XDisplay, screen_number: c_int) -> *mut XVisual;
    fn XDisplayCells(display: *mut XDisplay, screen_number: c_int) -> c_int;
    fn XDisplayPlanes(display: *mut XDisplay, screen_number: c_int) -> c_int;
    fn XExtendedMaxRequestSize(display: *mut XDisplay) -> c_long;
    fn XMaxRequestSize(display: *mut XDisplay) -> c_long;
    fn XLastKnownRequestProcessed(display: *mut XDisplay) -> c_ulong;
    fn XNextRequest(display: *mut XDisplay) -> c_ulong;
    fn XProtocolVersion(display: *mut XDisplay) -> c_int;
    fn XProtocolRevision(display: *mut XDisplay) -> c_int;
    fn XQLength(display: *mut XDisplay) -> c_int;
    fn XRootWindow(display: *mut XDisplay, screen_number: c_int) -> c_ulong;
    fn XScreenCount(display: *mut XDisplay) -> c_int;
    fn XServerVendor(display: *mut XDisplay) -> *mut c_char;
    fn XVendorRelease(display: *mut XDisplay) -> c_int;
    fn XActivateScreenSaver(display: *mut XDisplay) -> c_int;

    // Window creation
    fn XCreateWindow(
        display: *mut XDisplay,
        parent: c_ulong,
        x: c_int,
        y: c_int,
        width: c_uint,
        height: c_uint,
        border_width: c_uint,
        depth: c_int,
        class: c_uint,
        visual: *mut XVisual,
        valuemask: c_ulong,
        attributes: *mut XSetWindowAttributes,
    ) -> c_ulong;
    fn XCreateSimpleWindow(
        display: *mut XDisplay,
        parent: c_ulong,
        x: c_int,
        y: c_int,
        width: c_uint,
        height: c_uint,
        border_width: c_uint,
        border: c_ulong,
        background: c_ulong,
    ) -> c_ulong;

    // Properties and input
    fn XStoreName(display: *mut XDisplay, w: c_ulong, window_name: *const c_char) -> c_int;
    fn XInternAtom(display: *mut XDisplay, atom_name: *const c_char, only_if_exists: c_int) -> c_ulong;
    fn XSetWMProtocols(display: *mut XDisplay, w: c_ulong, protocols: *mut c_ulong, count: c_int) -> c_int;
    fn XSelectInput(display: *mut XDisplay, w: c_ulong, event_mask: c_long) -> c_int;
    fn XMapWindow(display: *mut XDisplay, w: c_ulong) -> c_int;

    // Events and output buffer
    /// Blocks until an event is queued.
    fn XNextEvent(display: *mut XDisplay, event_return: *mut XEvent) -> c_int;
    fn XPending(display: *mut XDisplay) -> c_int;
    fn XFlush(display: *mut XDisplay) -> c_int;
    fn XSync(display: *mut XDisplay, discard: c_int) -> c_int;

    fn XFree(data: *mut c_void) -> c_int;
}
