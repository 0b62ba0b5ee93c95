//! Event receive buffer
//!
//! `XNextEvent` writes a 192-byte `XEvent` union into caller memory. The
//! buffer is kept as raw bytes; accessors decode the fields every event shares
//! (`XAnyEvent`) and the client-message payload used by window-manager
//! protocols.

use crate::ffi::{NativeType, TypeTag};
use crate::handles::{Atom, Window};
use byteorder::{ByteOrder, NativeEndian};
use std::os::raw::{c_int, c_long};

// Event types (X.h)
pub const KEY_PRESS: c_int = 2;
pub const KEY_RELEASE: c_int = 3;
pub const BUTTON_PRESS: c_int = 4;
pub const BUTTON_RELEASE: c_int = 5;
pub const MOTION_NOTIFY: c_int = 6;
pub const FOCUS_IN: c_int = 9;
pub const FOCUS_OUT: c_int = 10;
pub const EXPOSE: c_int = 12;
pub const DESTROY_NOTIFY: c_int = 17;
pub const UNMAP_NOTIFY: c_int = 18;
pub const MAP_NOTIFY: c_int = 19;
pub const REPARENT_NOTIFY: c_int = 21;
pub const CONFIGURE_NOTIFY: c_int = 22;
pub const CLIENT_MESSAGE: c_int = 33;

// Input masks (X.h)
pub const NO_EVENT_MASK: c_long = 0;
pub const KEY_PRESS_MASK: c_long = 1 << 0;
pub const KEY_RELEASE_MASK: c_long = 1 << 1;
pub const BUTTON_PRESS_MASK: c_long = 1 << 2;
pub const BUTTON_RELEASE_MASK: c_long = 1 << 3;
pub const POINTER_MOTION_MASK: c_long = 1 << 6;
pub const EXPOSURE_MASK: c_long = 1 << 15;
pub const STRUCTURE_NOTIFY_MASK: c_long = 1 << 17;
pub const FOCUS_CHANGE_MASK: c_long = 1 << 21;

/// `sizeof(XEvent)`: 24 longs.
pub const EVENT_SIZE: usize = 192;

mod offset {
    pub const TYPE: usize = 0;
    pub const SERIAL: usize = 8;
    pub const SEND_EVENT: usize = 16;
    pub const WINDOW: usize = 32;
    pub const MESSAGE_TYPE: usize = 40;
    pub const FORMAT: usize = 48;
    pub const DATA: usize = 56;
}

/// Raw `XEvent` storage.
#[repr(C, align(8))]
#[derive(Clone, PartialEq, Eq)]
pub struct XEvent {
    bytes: [u8; EVENT_SIZE],
}

impl NativeType for *mut XEvent {
    const TAG: TypeTag = TypeTag::Buffer;
}

impl Default for XEvent {
    fn default() -> Self {
        XEvent {
            bytes: [0u8; EVENT_SIZE],
        }
    }
}

impl XEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8; EVENT_SIZE] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; EVENT_SIZE] {
        &mut self.bytes
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut XEvent {
        self
    }

    /// Event type code (`KEY_PRESS`, `EXPOSE`, ...).
    pub fn kind(&self) -> c_int {
        NativeEndian::read_i32(&self.bytes[offset::TYPE..])
    }

    /// Serial number of the last request processed by the server.
    pub fn serial(&self) -> u64 {
        NativeEndian::read_u64(&self.bytes[offset::SERIAL..])
    }

    /// True if the event came from a `SendEvent` request.
    pub fn send_event(&self) -> bool {
        NativeEndian::read_i32(&self.bytes[offset::SEND_EVENT..]) != 0
    }

    /// Window the event was reported relative to.
    pub fn window(&self) -> Window {
        Window::new(NativeEndian::read_u64(&self.bytes[offset::WINDOW..]))
    }

    /// Client-message type atom; only meaningful for `CLIENT_MESSAGE`.
    pub fn message_type(&self) -> Atom {
        Atom::new(NativeEndian::read_u64(&self.bytes[offset::MESSAGE_TYPE..]))
    }

    /// Client-message data format (8, 16 or 32).
    pub fn format(&self) -> c_int {
        NativeEndian::read_i32(&self.bytes[offset::FORMAT..])
    }

    /// Element `index` (0..5) of a format-32 client message, stored as `long`.
    pub fn data_long(&self, index: usize) -> Option<c_long> {
        if index >= 5 {
            return None;
        }
        let start = offset::DATA + index * 8;
        Some(NativeEndian::read_i64(&self.bytes[start..start + 8]))
    }

    /// Atom carried in the first data slot of a `WM_PROTOCOLS` message.
    pub fn protocol_atom(&self) -> Option<Atom> {
        if self.kind() != CLIENT_MESSAGE || self.format() != 32 {
            return None;
        }
        self.data_long(0).map(|value| Atom::new(value as u64))
    }
}

impl std::fmt::Debug for XEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XEvent")
            .field("kind", &self.kind())
            .field("serial", &self.serial())
            .field("send_event", &self.send_event())
            .field("window", &self.window())
            .finish_non_exhaustive()
    }
}
