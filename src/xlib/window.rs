//! Window creation and window properties

use super::{encode_c_string, Xlib};
use crate::attributes::WindowAttributes;
use crate::handles::{Atom, Display, Window};
use crate::Result;
use std::os::raw::{c_int, c_long, c_uint, c_ulong};
use std::ptr;

/// `CopyFromParent` for depth and visual.
const COPY_FROM_PARENT: c_int = 0;
/// `InputOutput` window class.
const INPUT_OUTPUT: c_uint = 1;

/// Position and size of a window relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: c_int,
    pub y: c_int,
    pub width: c_uint,
    pub height: c_uint,
}

impl Geometry {
    pub fn new(x: c_int, y: c_int, width: c_uint, height: c_uint) -> Self {
        Geometry {
            x,
            y,
            width,
            height,
        }
    }
}

impl Xlib {
    /// Create an InputOutput child of `parent` (`XCreateWindow`).
    ///
    /// Depth and visual are copied from the parent. Only the attributes set
    /// in `attributes` are sent; the value mask is derived from them.
    pub unsafe fn create_window(
        &self,
        display: Display,
        parent: Window,
        geometry: Geometry,
        border_width: c_uint,
        attributes: &WindowAttributes,
    ) -> Window {
        let (value_mask, mut record) = attributes.encode();
        log::trace!("XCreateWindow mask=0x{:x} {:?}", value_mask, record);

        let window = Window::new((self.fns.XCreateWindow)(
            display.as_ptr(),
            parent.raw(),
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height,
            border_width,
            COPY_FROM_PARENT,
            INPUT_OUTPUT,
            ptr::null_mut(),
            value_mask,
            record.as_mut_ptr(),
        ));
        log::debug!("Created window {} under {} ({:?})", window, parent, geometry);
        window
    }

    /// Create an unmapped InputOutput window with a border and background
    /// pixel (`XCreateSimpleWindow`).
    pub unsafe fn create_simple_window(
        &self,
        display: Display,
        parent: Window,
        geometry: Geometry,
        border_width: c_uint,
        border: c_ulong,
        background: c_ulong,
    ) -> Window {
        let window = Window::new((self.fns.XCreateSimpleWindow)(
            display.as_ptr(),
            parent.raw(),
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height,
            border_width,
            border,
            background,
        ));
        log::debug!("Created simple window {} under {} ({:?})", window, parent, geometry);
        window
    }

    /// Request the events in `event_mask` for `window` (`XSelectInput`).
    pub unsafe fn select_input(&self, display: Display, window: Window, event_mask: c_long) -> c_int {
        (self.fns.XSelectInput)(display.as_ptr(), window.raw(), event_mask)
    }

    /// Set the window title (`XStoreName`).
    pub unsafe fn store_name(&self, display: Display, window: Window, name: &str) -> Result<c_int> {
        let name = encode_c_string(name, "window name")?;
        Ok((self.fns.XStoreName)(display.as_ptr(), window.raw(), name.as_ptr()))
    }

    /// Look up or create an atom (`XInternAtom`). With `only_if_exists` a
    /// missing atom yields [`Atom::NONE`].
    pub unsafe fn intern_atom(&self, display: Display, name: &str, only_if_exists: bool) -> Result<Atom> {
        let name = encode_c_string(name, "atom name")?;
        Ok(Atom::new((self.fns.XInternAtom)(
            display.as_ptr(),
            name.as_ptr(),
            only_if_exists as c_int,
        )))
    }

    /// Replace the window's `WM_PROTOCOLS` property (`XSetWMProtocols`).
    pub unsafe fn set_wm_protocols(&self, display: Display, window: Window, protocols: &[Atom]) -> c_int {
        let mut atoms: Vec<c_ulong> = protocols.iter().map(Atom::raw).collect();
        let count = c_int::try_from(atoms.len()).unwrap_or(c_int::MAX);
        (self.fns.XSetWMProtocols)(display.as_ptr(), window.raw(), atoms.as_mut_ptr(), count)
    }

    /// Map the window (`XMapWindow`).
    pub unsafe fn map_window(&self, display: Display, window: Window) -> c_int {
        (self.fns.XMapWindow)(display.as_ptr(), window.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{XSetWindowAttributes, CW_BACK_PIXEL};
    use crate::ffi::{XDisplay, XVisual};
    use crate::loader::stub::StubResolver;
    use std::cell::RefCell;
    use std::ffi::CStr;
    use std::os::raw::{c_char, c_void};

    const FAKE_DISPLAY: usize = 0xd15_0000;

    #[derive(Debug, Clone, PartialEq)]
    struct CreateCall {
        parent: c_ulong,
        geometry: (c_int, c_int, c_uint, c_uint),
        border_width: c_uint,
        depth: c_int,
        class: c_uint,
        visual_null: bool,
        value_mask: c_ulong,
        record: Vec<u8>,
    }

    thread_local! {
        static CREATED: RefCell<Vec<CreateCall>> = const { RefCell::new(Vec::new()) };
        static STRINGS: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
        static PROTOCOLS: RefCell<Vec<c_ulong>> = const { RefCell::new(Vec::new()) };
    }

    #[allow(clippy::too_many_arguments)]
    unsafe extern "C" fn create_window(
        _: *mut XDisplay,
        parent: c_ulong,
        x: c_int,
        y: c_int,
        width: c_uint,
        height: c_uint,
        border_width: c_uint,
        depth: c_int,
        class: c_uint,
        visual: *mut XVisual,
        value_mask: c_ulong,
        attributes: *mut XSetWindowAttributes,
    ) -> c_ulong {
        CREATED.with(|cell| {
            cell.borrow_mut().push(CreateCall {
                parent,
                geometry: (x, y, width, height),
                border_width,
                depth,
                class,
                visual_null: visual.is_null(),
                value_mask,
                record: (*attributes).as_bytes().to_vec(),
            })
        });
        parent + 1
    }

    unsafe extern "C" fn store_name(_: *mut XDisplay, _: c_ulong, name: *const c_char) -> c_int {
        STRINGS.with(|cell| cell.borrow_mut().push(CStr::from_ptr(name).to_bytes_with_nul().to_vec()));
        1
    }

    unsafe extern "C" fn intern_atom(_: *mut XDisplay, name: *const c_char, only_if_exists: c_int) -> c_ulong {
        STRINGS.with(|cell| cell.borrow_mut().push(CStr::from_ptr(name).to_bytes_with_nul().to_vec()));
        if only_if_exists != 0 {
            0
        } else {
            0x150
        }
    }

    unsafe extern "C" fn set_wm_protocols(_: *mut XDisplay, _: c_ulong, protocols: *mut c_ulong, count: c_int) -> c_int {
        let atoms = std::slice::from_raw_parts(protocols, count as usize);
        PROTOCOLS.with(|cell| cell.borrow_mut().extend_from_slice(atoms));
        1
    }

    fn display() -> Display {
        Display::from_ptr(FAKE_DISPLAY as *mut XDisplay)
    }

    #[test]
    fn test_create_window_marshalling() {
        CREATED.with(|cell| cell.borrow_mut().clear());
        let xlib = StubResolver::zeroed()
            .with("XCreateWindow", create_window as *const c_void)
            .load();

        let parent = Window::new(0x2a0);
        let attrs = WindowAttributes::new().background_pixel(0x00ff00);
        let window = unsafe { xlib.create_window(display(), parent, Geometry::new(0, 0, 400, 300), 1, &attrs) };
        assert_eq!(window, Window::new(0x2a1));
        assert_ne!(window, parent);

        let calls = CREATED.with(|cell| cell.borrow().clone());
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.parent, 0x2a0);
        assert_eq!(call.geometry, (0, 0, 400, 300));
        assert_eq!(call.border_width, 1);
        assert_eq!(call.depth, COPY_FROM_PARENT);
        assert_eq!(call.class, INPUT_OUTPUT);
        assert!(call.visual_null);
        assert_eq!(call.value_mask, CW_BACK_PIXEL);
        assert_eq!(call.record, attrs.encode().1.as_bytes().to_vec());
    }

    #[test]
    fn test_string_arguments_are_terminated() {
        STRINGS.with(|cell| cell.borrow_mut().clear());
        let xlib = StubResolver::zeroed()
            .with("XStoreName", store_name as *const c_void)
            .with("XInternAtom", intern_atom as *const c_void)
            .load();

        unsafe {
            assert_eq!(xlib.store_name(display(), Window::new(1), "hello").unwrap(), 1);
            assert_eq!(
                xlib.intern_atom(display(), "WM_DELETE_WINDOW", false).unwrap(),
                Atom::new(0x150)
            );
            assert!(xlib.intern_atom(display(), "_NOT_THERE", true).unwrap().is_null());
            assert!(xlib.store_name(display(), Window::new(1), "a\0b").is_err());
        }

        let strings = STRINGS.with(|cell| cell.borrow().clone());
        assert_eq!(
            strings,
            vec![
                b"hello\0".to_vec(),
                b"WM_DELETE_WINDOW\0".to_vec(),
                b"_NOT_THERE\0".to_vec(),
            ]
        );
    }

    #[test]
    fn test_set_wm_protocols_passes_atoms() {
        PROTOCOLS.with(|cell| cell.borrow_mut().clear());
        let xlib = StubResolver::zeroed()
            .with("XSetWMProtocols", set_wm_protocols as *const c_void)
            .load();

        let status = unsafe { xlib.set_wm_protocols(display(), Window::new(1), &[Atom::new(0x150), Atom::new(0x151)]) };
        assert_eq!(status, 1);
        assert_eq!(PROTOCOLS.with(|cell| cell.borrow().clone()), vec![0x150, 0x151]);
    }

    #[test]
    fn test_fire_and_forget_status_is_returned() {
        let xlib = StubResolver::zeroed().load();
        unsafe {
            assert_eq!(xlib.map_window(display(), Window::new(1)), 0);
            assert_eq!(xlib.select_input(display(), Window::new(1), 1 << 15), 0);
            assert!(xlib
                .create_simple_window(display(), Window::new(1), Geometry::new(0, 0, 10, 10), 0, 0, 0)
                .is_null());
        }
    }
}
