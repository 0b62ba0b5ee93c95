//! Native type vocabulary
//!
//! The symbol table describes every bound entry point with a small set of type
//! tags. Each Rust type that crosses the C boundary implements [`NativeType`],
//! which ties it to exactly one tag, so the table and the typed function
//! pointers are generated from a single declaration and cannot drift apart.

pub mod symbols;

pub use symbols::{XlibFns, SYMBOLS};

use std::fmt;
use std::os::raw::{c_char, c_int, c_long, c_uint, c_ulong, c_void};

// Every tag below assumes LP64: `long` and pointers are 8 bytes wide.
const _: () = assert!(std::mem::size_of::<c_ulong>() == 8);
const _: () = assert!(std::mem::size_of::<*mut c_void>() == 8);

/// Calling-convention slot of a parameter or result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Opaque native address, never dereferenced on this side
    Pointer,
    I32,
    U32,
    I64,
    U64,
    /// Address of a byte region the native side reads or writes
    Buffer,
    Void,
}

impl TypeTag {
    /// Width of the slot in bytes (0 for `Void`).
    pub fn size(&self) -> usize {
        match self {
            TypeTag::I32 | TypeTag::U32 => 4,
            TypeTag::Pointer | TypeTag::I64 | TypeTag::U64 | TypeTag::Buffer => 8,
            TypeTag::Void => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Pointer => "pointer",
            TypeTag::I32 => "i32",
            TypeTag::U32 => "u32",
            TypeTag::I64 => "i64",
            TypeTag::U64 => "u64",
            TypeTag::Buffer => "buffer",
            TypeTag::Void => "void",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Rust type that may appear in a bound native signature.
pub trait NativeType {
    const TAG: TypeTag;
}

macro_rules! native_type {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(impl NativeType for $ty {
            const TAG: TypeTag = TypeTag::$tag;
        })*
    };
}

native_type! {
    () => Void,
    c_int => I32,
    c_uint => U32,
    c_long => I64,
    c_ulong => U64,
    *mut c_void => Pointer,
    *mut XDisplay => Pointer,
    *mut XScreen => Pointer,
    *mut XVisual => Pointer,
    *mut XGc => Pointer,
    *const c_char => Buffer,
    *mut c_char => Buffer,
    *mut c_int => Buffer,
    *mut c_ulong => Buffer,
}

/// Declared calling signature of one native entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub name: &'static str,
    pub params: &'static [TypeTag],
    pub result: TypeTag,
}

impl Signature {
    /// Look up a declared signature by symbol name.
    pub fn find(name: &str) -> Option<&'static Signature> {
        SYMBOLS.iter().find(|sig| sig.name == name)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ") -> {}", self.result)
    }
}

/// `Display` as declared by Xlib. Only ever handled behind a pointer.
#[repr(C)]
pub struct XDisplay {
    _private: [u8; 0],
}

/// `Screen`, opaque.
#[repr(C)]
pub struct XScreen {
    _private: [u8; 0],
}

/// `Visual`, opaque.
#[repr(C)]
pub struct XVisual {
    _private: [u8; 0],
}

/// `struct _XGC`, opaque.
#[repr(C)]
pub struct XGc {
    _private: [u8; 0],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_widths() {
        assert_eq!(<c_int as NativeType>::TAG.size(), 4);
        assert_eq!(<c_ulong as NativeType>::TAG.size(), 8);
        assert_eq!(<*mut XDisplay as NativeType>::TAG, TypeTag::Pointer);
        assert_eq!(<*const c_char as NativeType>::TAG, TypeTag::Buffer);
        assert_eq!(<() as NativeType>::TAG.size(), 0);
    }

    #[test]
    fn test_signature_display() {
        let sig = Signature::find("XBlackPixel").unwrap();
        assert_eq!(sig.to_string(), "XBlackPixel(pointer, i32) -> u64");
    }

    #[test]
    fn test_signature_find_unknown() {
        assert!(Signature::find("XDestroyWindow").is_none());
    }
}
