use core::fmt::Display;

// -----------------------------------------------------------------------------
// ContainerKind

/// Shape requested when entering a region of a document.
///
/// This is a request, not a stored tag: output archives coerce the entered
/// node to the requested shape, input archives refuse to enter a node of
/// another shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// An ordered sequence addressed by index.
    Array,
    /// An association addressed by string key.
    Map,
}

impl ContainerKind {
    /// Lower-case name, also used as a tag by text backends.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Map => "map",
        }
    }

    /// Inverse of [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "array" => Some(Self::Array),
            "map" => Some(Self::Map),
            _ => None,
        }
    }
}

impl Display for ContainerKind {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// Direction

/// Whether an archive reads from or writes to its document.
///
/// Fixed for the lifetime of an archive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Validating: absence and mismatches are reported, the document is never modified.
    Input,
    /// Creating: missing structure is created on access.
    Output,
}

impl Direction {
    #[inline]
    pub const fn is_input(self) -> bool {
        matches!(self, Self::Input)
    }

    #[inline]
    pub const fn is_output(self) -> bool {
        matches!(self, Self::Output)
    }
}

// -----------------------------------------------------------------------------
// Tests
