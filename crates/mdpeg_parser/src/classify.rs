//! Byte classes used by the grammar.
//!
//! Each class is a 256-bit set computed at compile time, so a lookup is a
//! shift and a mask.

/// A set of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ByteSet([u8; 32]);

impl ByteSet {
    const fn of(bytes: &[u8]) -> Self {
        let mut bits = [0u8; 32];
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            bits[(b >> 3) as usize] |= 1 << (b & 7);
            i += 1;
        }
        Self(bits)
    }

    const fn with_range(self, lo: u8, hi: u8) -> Self {
        let mut bits = self.0;
        let mut b = lo;
        loop {
            bits[(b >> 3) as usize] |= 1 << (b & 7);
            if b == hi {
                break;
            }
            b += 1;
        }
        Self(bits)
    }

    #[inline]
    const fn contains(&self, b: u8) -> bool {
        self.0[(b >> 3) as usize] & (1 << (b & 7)) != 0
    }
}

const DIGIT: ByteSet = ByteSet::of(&[]).with_range(b'0', b'9');
const ALPHA: ByteSet = ByteSet::of(&[]).with_range(b'a', b'z').with_range(b'A', b'Z');
const ALPHANUMERIC_ASCII: ByteSet = ByteSet::of(&[])
    .with_range(b'0', b'9')
    .with_range(b'a', b'z')
    .with_range(b'A', b'Z');
const ALPHANUMERIC: ByteSet = ByteSet::of(&[])
    .with_range(b'0', b'9')
    .with_range(b'a', b'z')
    .with_range(b'A', b'Z')
    .with_range(0x80, 0xff);
const HEX_DIGIT: ByteSet = ByteSet::of(&[])
    .with_range(b'0', b'9')
    .with_range(b'a', b'f')
    .with_range(b'A', b'F');
const HEX_MARKER: ByteSet = ByteSet::of(b"xX");
const ESCAPABLE: ByteSet = ByteSet::of(b"-\\`|*_{}[]()#+.!><");
const EMAIL_LOCAL: ByteSet = ByteSet::of(b"-+_./!%~$")
    .with_range(b'0', b'9')
    .with_range(b'a', b'z')
    .with_range(b'A', b'Z');
const SPECIAL: ByteSet = ByteSet::of(b"'\"\\#!<)(][&`_*");
const SPACE: ByteSet = ByteSet::of(b" \t");

/// Named byte classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteClass {
    /// `0-9`
    Digit,
    /// `A-Za-z`
    Alpha,
    /// `A-Za-z0-9`
    AlphanumericAscii,
    /// ASCII letters and digits, plus every byte of a multi-byte character.
    Alphanumeric,
    /// `0-9a-fA-F`
    HexDigit,
    /// `xX`
    HexMarker,
    /// Characters a backslash can escape.
    Escapable,
    /// Characters allowed in the local part of an autolinked address.
    EmailLocal,
    /// Characters that may start inline markup.
    Special,
    /// Space and tab.
    Space,
}

impl ByteClass {
    const fn set(self) -> &'static ByteSet {
        match self {
            Self::Digit => &DIGIT,
            Self::Alpha => &ALPHA,
            Self::AlphanumericAscii => &ALPHANUMERIC_ASCII,
            Self::Alphanumeric => &ALPHANUMERIC,
            Self::HexDigit => &HEX_DIGIT,
            Self::HexMarker => &HEX_MARKER,
            Self::Escapable => &ESCAPABLE,
            Self::EmailLocal => &EMAIL_LOCAL,
            Self::Special => &SPECIAL,
            Self::Space => &SPACE,
        }
    }

    /// Returns true if `byte` belongs to this class.
    #[inline]
    pub const fn contains(self, byte: u8) -> bool {
        self.set().contains(byte)
    }
}

/// Returns true if `byte` belongs to `class`.
#[inline]
pub const fn classify(byte: u8, class: ByteClass) -> bool {
    class.contains(byte)
}
