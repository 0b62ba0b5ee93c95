//! Window-creation attributes
//!
//! `XCreateWindow` takes a value mask and a pointer to an
//! `XSetWindowAttributes` record; Xlib reads only the fields whose `CW*` bit is
//! set in the mask. The record here is a byte image of that C struct (LP64
//! layout) with every field at its documented offset. The builder writes only
//! the fields the caller supplied and leaves every other byte zero.
//!
//! | Offset | Field                  | Mask bit            |
//! |--------|------------------------|---------------------|
//! | 0      | background_pixmap      | `CW_BACK_PIXMAP`    |
//! | 8      | background_pixel       | `CW_BACK_PIXEL`     |
//! | 16     | border_pixmap          | `CW_BORDER_PIXMAP`  |
//! | 24     | border_pixel           | `CW_BORDER_PIXEL`   |
//! | 32     | bit_gravity (int)      | `CW_BIT_GRAVITY`    |
//! | 36     | win_gravity (int)      | `CW_WIN_GRAVITY`    |
//! | 40     | backing_store (int)    | `CW_BACKING_STORE`  |
//! | 48     | backing_planes         | `CW_BACKING_PLANES` |
//! | 56     | backing_pixel          | `CW_BACKING_PIXEL`  |
//! | 64     | save_under (Bool)      | `CW_SAVE_UNDER`     |
//! | 72     | event_mask             | `CW_EVENT_MASK`     |
//! | 80     | do_not_propagate_mask  | `CW_DONT_PROPAGATE` |
//! | 88     | override_redirect      | `CW_OVERRIDE_REDIRECT` |
//! | 96     | colormap               | `CW_COLORMAP`       |
//! | 104    | cursor                 | `CW_CURSOR`         |

use crate::ffi::{NativeType, TypeTag};
use crate::handles::Colormap;
use byteorder::{ByteOrder, NativeEndian};
use std::os::raw::{c_int, c_long, c_ulong};

pub const CW_BACK_PIXMAP: c_ulong = 1 << 0;
pub const CW_BACK_PIXEL: c_ulong = 1 << 1;
pub const CW_BORDER_PIXMAP: c_ulong = 1 << 2;
pub const CW_BORDER_PIXEL: c_ulong = 1 << 3;
pub const CW_BIT_GRAVITY: c_ulong = 1 << 4;
pub const CW_WIN_GRAVITY: c_ulong = 1 << 5;
pub const CW_BACKING_STORE: c_ulong = 1 << 6;
pub const CW_BACKING_PLANES: c_ulong = 1 << 7;
pub const CW_BACKING_PIXEL: c_ulong = 1 << 8;
pub const CW_OVERRIDE_REDIRECT: c_ulong = 1 << 9;
pub const CW_SAVE_UNDER: c_ulong = 1 << 10;
pub const CW_EVENT_MASK: c_ulong = 1 << 11;
pub const CW_DONT_PROPAGATE: c_ulong = 1 << 12;
pub const CW_COLORMAP: c_ulong = 1 << 13;
pub const CW_CURSOR: c_ulong = 1 << 14;

/// Size of `XSetWindowAttributes` on LP64.
pub const RECORD_SIZE: usize = 112;

/// Width of one `unsigned long`/`long` field.
pub const FIELD_SIZE: usize = 8;

mod offset {
    pub const BACKGROUND_PIXEL: usize = 8;
    pub const BORDER_PIXEL: usize = 24;
    pub const BIT_GRAVITY: usize = 32;
    pub const WIN_GRAVITY: usize = 36;
    pub const EVENT_MASK: usize = 72;
    pub const OVERRIDE_REDIRECT: usize = 88;
    pub const COLORMAP: usize = 96;
}

/// Encode an optional 8-byte field. `None` yields eight zero bytes.
pub fn encode_field(value: Option<u64>) -> [u8; FIELD_SIZE] {
    let mut field = [0u8; FIELD_SIZE];
    if let Some(value) = value {
        NativeEndian::write_u64(&mut field, value);
    }
    field
}

/// Inverse of [`encode_field`] for a present value.
pub fn decode_field(field: &[u8; FIELD_SIZE]) -> u64 {
    NativeEndian::read_u64(field)
}

/// Byte image of `XSetWindowAttributes`, aligned like the C struct.
#[repr(C, align(8))]
#[derive(Clone, PartialEq, Eq)]
pub struct XSetWindowAttributes {
    bytes: [u8; RECORD_SIZE],
}

impl NativeType for *mut XSetWindowAttributes {
    const TAG: TypeTag = TypeTag::Buffer;
}

impl XSetWindowAttributes {
    pub fn zeroed() -> Self {
        XSetWindowAttributes {
            bytes: [0u8; RECORD_SIZE],
        }
    }

    pub fn as_bytes(&self) -> &[u8; RECORD_SIZE] {
        &self.bytes
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut XSetWindowAttributes {
        self
    }

    fn write_u64(&mut self, offset: usize, value: u64) {
        self.bytes[offset..offset + FIELD_SIZE].copy_from_slice(&encode_field(Some(value)));
    }

    fn write_i32(&mut self, offset: usize, value: i32) {
        NativeEndian::write_i32(&mut self.bytes[offset..offset + 4], value);
    }

    fn read_u64(&self, offset: usize) -> u64 {
        NativeEndian::read_u64(&self.bytes[offset..offset + FIELD_SIZE])
    }

    fn read_i32(&self, offset: usize) -> i32 {
        NativeEndian::read_i32(&self.bytes[offset..offset + 4])
    }
}

impl std::fmt::Debug for XSetWindowAttributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XSetWindowAttributes")
            .field("background_pixel", &self.read_u64(offset::BACKGROUND_PIXEL))
            .field("border_pixel", &self.read_u64(offset::BORDER_PIXEL))
            .field("event_mask", &self.read_u64(offset::EVENT_MASK))
            .field("colormap", &self.read_u64(offset::COLORMAP))
            .finish_non_exhaustive()
    }
}

/// Optional window attributes, as supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowAttributes {
    pub background_pixel: Option<c_ulong>,
    pub border_pixel: Option<c_ulong>,
    pub bit_gravity: Option<c_int>,
    pub win_gravity: Option<c_int>,
    pub event_mask: Option<c_long>,
    pub override_redirect: Option<bool>,
    pub colormap: Option<Colormap>,
}

impl WindowAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background_pixel(mut self, pixel: c_ulong) -> Self {
        self.background_pixel = Some(pixel);
        self
    }

    pub fn border_pixel(mut self, pixel: c_ulong) -> Self {
        self.border_pixel = Some(pixel);
        self
    }

    pub fn bit_gravity(mut self, gravity: c_int) -> Self {
        self.bit_gravity = Some(gravity);
        self
    }

    pub fn win_gravity(mut self, gravity: c_int) -> Self {
        self.win_gravity = Some(gravity);
        self
    }

    pub fn event_mask(mut self, mask: c_long) -> Self {
        self.event_mask = Some(mask);
        self
    }

    pub fn override_redirect(mut self, enabled: bool) -> Self {
        self.override_redirect = Some(enabled);
        self
    }

    pub fn colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = Some(colormap);
        self
    }

    /// Value mask with one bit per supplied field.
    pub fn value_mask(&self) -> c_ulong {
        let mut mask = 0;
        if self.background_pixel.is_some() {
            mask |= CW_BACK_PIXEL;
        }
        if self.border_pixel.is_some() {
            mask |= CW_BORDER_PIXEL;
        }
        if self.bit_gravity.is_some() {
            mask |= CW_BIT_GRAVITY;
        }
        if self.win_gravity.is_some() {
            mask |= CW_WIN_GRAVITY;
        }
        if self.event_mask.is_some() {
            mask |= CW_EVENT_MASK;
        }
        if self.override_redirect.is_some() {
            mask |= CW_OVERRIDE_REDIRECT;
        }
        if self.colormap.is_some() {
            mask |= CW_COLORMAP;
        }
        mask
    }

    /// Encode into the native record. Fields that were not supplied stay zero.
    pub fn encode(&self) -> (c_ulong, XSetWindowAttributes) {
        let mut record = XSetWindowAttributes::zeroed();
        if let Some(pixel) = self.background_pixel {
            record.write_u64(offset::BACKGROUND_PIXEL, pixel);
        }
        if let Some(pixel) = self.border_pixel {
            record.write_u64(offset::BORDER_PIXEL, pixel);
        }
        if let Some(gravity) = self.bit_gravity {
            record.write_i32(offset::BIT_GRAVITY, gravity);
        }
        if let Some(gravity) = self.win_gravity {
            record.write_i32(offset::WIN_GRAVITY, gravity);
        }
        if let Some(mask) = self.event_mask {
            record.write_u64(offset::EVENT_MASK, mask as u64);
        }
        if let Some(enabled) = self.override_redirect {
            record.write_i32(offset::OVERRIDE_REDIRECT, enabled as i32);
        }
        if let Some(colormap) = self.colormap {
            record.write_u64(offset::COLORMAP, colormap.raw());
        }
        (self.value_mask(), record)
    }

    /// Recover the supplied fields from a mask and record.
    pub fn decode(mask: c_ulong, record: &XSetWindowAttributes) -> Self {
        let present = |bit: c_ulong| mask & bit != 0;
        WindowAttributes {
            background_pixel: present(CW_BACK_PIXEL)
                .then(|| record.read_u64(offset::BACKGROUND_PIXEL)),
            border_pixel: present(CW_BORDER_PIXEL).then(|| record.read_u64(offset::BORDER_PIXEL)),
            bit_gravity: present(CW_BIT_GRAVITY).then(|| record.read_i32(offset::BIT_GRAVITY)),
            win_gravity: present(CW_WIN_GRAVITY).then(|| record.read_i32(offset::WIN_GRAVITY)),
            event_mask: present(CW_EVENT_MASK).then(|| record.read_u64(offset::EVENT_MASK) as c_long),
            override_redirect: present(CW_OVERRIDE_REDIRECT)
                .then(|| record.read_i32(offset::OVERRIDE_REDIRECT) != 0),
            colormap: present(CW_COLORMAP).then(|| Colormap::new(record.read_u64(offset::COLORMAP))),
        }
    }
}
