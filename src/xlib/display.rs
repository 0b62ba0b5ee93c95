//! Connection and query accessors

use super::{copy_c_string, encode_c_string, Xlib};
use crate::handles::{Colormap, Display, Gc, Screen, Visual, Window};
use crate::Result;
use std::env;
use std::os::raw::{c_int, c_long, c_ulong};
use std::ptr;

/// Display name to connect to: the explicit one, else `$DISPLAY`.
pub fn resolve_display_name(name: Option<&str>) -> Option<String> {
    name.map(str::to_owned)
        .or_else(|| env::var("DISPLAY").ok())
}

impl Xlib {
    /// Open a connection to the X server (`XOpenDisplay`).
    ///
    /// `name` defaults to `$DISPLAY`. If neither is set a null name is passed
    /// and Xlib applies its own default. An unreachable server yields
    /// [`Display::NULL`], not an error; the only error is a name that cannot
    /// be encoded as a C string.
    pub fn open_display(&self, name: Option<&str>) -> Result<Display> {
        let resolved = resolve_display_name(name);
        let encoded = resolved
            .as_deref()
            .map(|name| encode_c_string(name, "display name"))
            .transpose()?;
        let name_ptr = encoded.as_ref().map_or(ptr::null(), |name| name.as_ptr());

        let display = Display::from_ptr(unsafe { (self.fns.XOpenDisplay)(name_ptr) });
        if display.is_null() {
            log::debug!("XOpenDisplay({:?}) returned NULL", resolved);
        } else {
            log::debug!("Opened display {:?} at {}", resolved, display);
        }
        Ok(display)
    }

    /// Close the connection (`XCloseDisplay`). The handle is dead afterwards.
    pub unsafe fn close_display(&self, display: Display) -> c_int {
        log::debug!("Closing display {}", display);
        (self.fns.XCloseDisplay)(display.as_ptr())
    }

    /// The string that was passed to `XOpenDisplay` (`XDisplayString`).
    pub unsafe fn display_string(&self, display: Display) -> Option<String> {
        copy_c_string((self.fns.XDisplayString)(display.as_ptr()))
    }

    /// A plane mask with all bits set (`XAllPlanes`). Needs no connection.
    pub fn all_planes(&self) -> c_ulong {
        unsafe { (self.fns.XAllPlanes)() }
    }

    pub unsafe fn black_pixel(&self, display: Display, screen_number: c_int) -> c_ulong {
        (self.fns.XBlackPixel)(display.as_ptr(), screen_number)
    }

    pub unsafe fn white_pixel(&self, display: Display, screen_number: c_int) -> c_ulong {
        (self.fns.XWhitePixel)(display.as_ptr(), screen_number)
    }

    /// File descriptor of the connection on POSIX systems.
    pub unsafe fn connection_number(&self, display: Display) -> c_int {
        (self.fns.XConnectionNumber)(display.as_ptr())
    }

    pub unsafe fn default_colormap(&self, display: Display, screen_number: c_int) -> Colormap {
        Colormap::new((self.fns.XDefaultColormap)(display.as_ptr(), screen_number))
    }

    pub unsafe fn default_depth(&self, display: Display, screen_number: c_int) -> c_int {
        (self.fns.XDefaultDepth)(display.as_ptr(), screen_number)
    }

    /// Depths available on a screen (`XListDepths`).
    ///
    /// The native array is copied out and released with `XFree`. `None` when
    /// Xlib returns NULL (invalid screen or allocation failure).
    pub unsafe fn list_depths(&self, display: Display, screen_number: c_int) -> Option<Vec<c_int>> {
        let mut count: c_int = 0;
        let depths = (self.fns.XListDepths)(display.as_ptr(), screen_number, &mut count);
        if depths.is_null() {
            return None;
        }
        let list = std::slice::from_raw_parts(depths, count.max(0) as usize).to_vec();
        (self.fns.XFree)(depths.cast());
        Some(list)
    }

    /// Default GC of the screen's root window. Never free it.
    pub unsafe fn default_gc(&self, display: Display, screen_number: c_int) -> Gc {
        Gc::from_ptr((self.fns.XDefaultGC)(display.as_ptr(), screen_number))
    }

    pub unsafe fn default_root_window(&self, display: Display) -> Window {
        Window::new((self.fns.XDefaultRootWindow)(display.as_ptr()))
    }

    pub unsafe fn default_screen_of_display(&self, display: Display) -> Screen {
        Screen::from_ptr((self.fns.XDefaultScreenOfDisplay)(display.as_ptr()))
    }

    pub unsafe fn screen_of_display(&self, display: Display, screen_number: c_int) -> Screen {
        Screen::from_ptr((self.fns.XScreenOfDisplay)(display.as_ptr(), screen_number))
    }

    /// Screen number chosen by `XOpenDisplay`.
    pub unsafe fn default_screen(&self, display: Display) -> c_int {
        (self.fns.XDefaultScreen)(display.as_ptr())
    }

    pub unsafe fn default_visual(&self, display: Display, screen_number: c_int) -> Visual {
        Visual::from_ptr((self.fns.XDefaultVisual)(display.as_ptr(), screen_number))
    }

    /// Number of entries in the default colormap.
    pub unsafe fn display_cells(&self, display: Display, screen_number: c_int) -> c_int {
        (self.fns.XDisplayCells)(display.as_ptr(), screen_number)
    }

    /// Depth of the root window.
    pub unsafe fn display_planes(&self, display: Display, screen_number: c_int) -> c_int {
        (self.fns.XDisplayPlanes)(display.as_ptr(), screen_number)
    }

    /// Maximum request size in 4-byte units with BIG-REQUESTS, 0 without.
    pub unsafe fn extended_max_request_size(&self, display: Display) -> c_long {
        (self.fns.XExtendedMaxRequestSize)(display.as_ptr())
    }

    /// Maximum request size in 4-byte units.
    pub unsafe fn max_request_size(&self, display: Display) -> c_long {
        (self.fns.XMaxRequestSize)(display.as_ptr())
    }

    pub unsafe fn last_known_request_processed(&self, display: Display) -> c_ulong {
        (self.fns.XLastKnownRequestProcessed)(display.as_ptr())
    }

    pub unsafe fn next_request(&self, display: Display) -> c_ulong {
        (self.fns.XNextRequest)(display.as_ptr())
    }

    pub unsafe fn protocol_version(&self, display: Display) -> c_int {
        (self.fns.XProtocolVersion)(display.as_ptr())
    }

    pub unsafe fn protocol_revision(&self, display: Display) -> c_int {
        (self.fns.XProtocolRevision)(display.as_ptr())
    }

    /// Events already read and queued by Xlib.
    pub unsafe fn q_length(&self, display: Display) -> c_int {
        (self.fns.XQLength)(display.as_ptr())
    }

    pub unsafe fn root_window(&self, display: Display, screen_number: c_int) -> Window {
        Window::new((self.fns.XRootWindow)(display.as_ptr(), screen_number))
    }

    pub unsafe fn screen_count(&self, display: Display) -> c_int {
        (self.fns.XScreenCount)(display.as_ptr())
    }

    pub unsafe fn server_vendor(&self, display: Display) -> Option<String> {
        copy_c_string((self.fns.XServerVendor)(display.as_ptr()))
    }

    pub unsafe fn vendor_release(&self, display: Display) -> c_int {
        (self.fns.XVendorRelease)(display.as_ptr())
    }

    pub unsafe fn activate_screen_saver(&self, display: Display) -> c_int {
        (self.fns.XActivateScreenSaver)(display.as_ptr())
    }
}
