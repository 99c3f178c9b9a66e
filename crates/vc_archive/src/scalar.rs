use alloc::string::String;
use core::fmt::Display;

// -----------------------------------------------------------------------------
// ScalarMut

/// A mutable borrow of one of the fixed set of scalar kinds.
///
/// Archives read into and write from the borrowed value. Reading goes
/// through the `assign_*` methods, which only succeed when the document
/// value fits the target kind, writing goes through [`view`](Self::view).
#[derive(Debug)]
pub enum ScalarMut<'v> {
    Bool(&'v mut bool),
    I8(&'v mut i8),
    U8(&'v mut u8),
    I16(&'v mut i16),
    U16(&'v mut u16),
    I32(&'v mut i32),
    U32(&'v mut u32),
    I64(&'v mut i64),
    U64(&'v mut u64),
    F32(&'v mut f32),
    F64(&'v mut f64),
    String(&'v mut String),
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl<'v> From<&'v mut $ty> for ScalarMut<'v> {
            #[inline]
            fn from(value: &'v mut $ty) -> Self {
                Self::$variant(value)
            }
        }
    )*};
}

impl_from_scalar! {
    bool => Bool,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
}

// Leaves `target` untouched when `value` does not fit.
fn narrow<T: TryFrom<V>, V>(target: &mut T, value: V) -> bool {
    match T::try_from(value) {
        Ok(v) => {
            *target = v;
            true
        }
        Err(_) => false,
    }
}

impl ScalarMut<'_> {
    /// Rust name of the borrowed kind, for diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::I8(_) => "i8",
            Self::U8(_) => "u8",
            Self::I16(_) => "i16",
            Self::U16(_) => "u16",
            Self::I32(_) => "i32",
            Self::U32(_) => "u32",
            Self::I64(_) => "i64",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::String(_) => "String",
        }
    }

    /// Snapshot of the current value.
    pub fn view(&self) -> ScalarView<'_> {
        match self {
            Self::Bool(v) => ScalarView::Bool(**v),
            Self::I8(v) => ScalarView::Signed(i64::from(**v)),
            Self::U8(v) => ScalarView::Unsigned(u64::from(**v)),
            Self::I16(v) => ScalarView::Signed(i64::from(**v)),
            Self::U16(v) => ScalarView::Unsigned(u64::from(**v)),
            Self::I32(v) => ScalarView::Signed(i64::from(**v)),
            Self::U32(v) => ScalarView::Unsigned(u64::from(**v)),
            Self::I64(v) => ScalarView::Signed(**v),
            Self::U64(v) => ScalarView::Unsigned(**v),
            Self::F32(v) => ScalarView::F32(**v),
            Self::F64(v) => ScalarView::F64(**v),
            Self::String(v) => ScalarView::Str(v.as_str()),
        }
    }

    /// Stores a boolean. Fails unless the target is `bool`.
    pub fn assign_bool(&mut self, value: bool) -> bool {
        match self {
            Self::Bool(t) => {
                **t = value;
                true
            }
            _ => false,
        }
    }

    /// Stores a signed integer into any integer target it fits in.
    pub fn assign_signed(&mut self, value: i64) -> bool {
        match self {
            Self::I8(t) => narrow(&mut **t, value),
            Self::U8(t) => narrow(&mut **t, value),
            Self::I16(t) => narrow(&mut **t, value),
            Self::U16(t) => narrow(&mut **t, value),
            Self::I32(t) => narrow(&mut **t, value),
            Self::U32(t) => narrow(&mut **t, value),
            Self::I64(t) => narrow(&mut **t, value),
            Self::U64(t) => narrow(&mut **t, value),
            _ => false,
        }
    }

    /// Stores an unsigned integer into any integer target it fits in.
    pub fn assign_unsigned(&mut self, value: u64) -> bool {
        match self {
            Self::I8(t) => narrow(&mut **t, value),
            Self::U8(t) => narrow(&mut **t, value),
            Self::I16(t) => narrow(&mut **t, value),
            Self::U16(t) => narrow(&mut **t, value),
            Self::I32(t) => narrow(&mut **t, value),
            Self::U32(t) => narrow(&mut **t, value),
            Self::I64(t) => narrow(&mut **t, value),
            Self::U64(t) => narrow(&mut **t, value),
            _ => false,
        }
    }

    /// Stores a floating point number. Fails unless the target is `f32`
    /// or `f64`; `f32` targets receive the nearest representable value.
    pub fn assign_float(&mut self, value: f64) -> bool {
        match self {
            Self::F32(t) => {
                **t = value as f32;
                true
            }
            Self::F64(t) => {
                **t = value;
                true
            }
            _ => false,
        }
    }

    /// Stores a string. Fails unless the target is `String`.
    pub fn assign_str(&mut self, value: &str) -> bool {
        match self {
            Self::String(t) => {
                t.clear();
                t.push_str(value);
                true
            }
            _ => false,
        }
    }

    /// Parses `text` as the target kind, the inverse of [`ScalarView`]'s
    /// `Display` output.
    ///
    /// Strings are taken verbatim, every other kind ignores surrounding
    /// whitespace. Booleans accept exactly `true` and `false`.
    pub fn assign_text(&mut self, text: &str) -> bool {
        if let Self::String(_) = self {
            return self.assign_str(text);
        }
        let text = text.trim();
        match self {
            Self::Bool(_) => match text {
                "true" => self.assign_bool(true),
                "false" => self.assign_bool(false),
                _ => false,
            },
            Self::I8(_) | Self::I16(_) | Self::I32(_) | Self::I64(_) => {
                text.parse().is_ok_and(|v| self.assign_signed(v))
            }
            Self::U8(_) | Self::U16(_) | Self::U32(_) | Self::U64(_) => {
                text.parse().is_ok_and(|v| self.assign_unsigned(v))
            }
            Self::F32(_) | Self::F64(_) => text.parse().is_ok_and(|v| self.assign_float(v)),
            Self::String(_) => false,
        }
    }
}

// -----------------------------------------------------------------------------
// ScalarView

/// Read-only snapshot of a scalar, widened to 64 bits.
///
/// `f32` keeps its own variant so text backends can print the shortest
/// representation that reads back to the same `f32`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarView<'v> {
    Bool(bool),
    Signed(i64),
    Unsigned(u64),
    F32(f32),
    F64(f64),
    Str(&'v str),
}

impl Display for ScalarView<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bool(v) => Display::fmt(v, f),
            Self::Signed(v) => Display::fmt(v, f),
            Self::Unsigned(v) => Display::fmt(v, f),
            Self::F32(v) => Display::fmt(v, f),
            Self::F64(v) => Display::fmt(v, f),
            Self::Str(v) => f.write_str(v),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
