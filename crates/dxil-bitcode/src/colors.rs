//! ANSI styling for [`dump`](crate::dump) output.
//!
//! Roles rather than hues: block headers, record codes, abbreviation
//! definitions, and dimmed metadata (ids, widths, lengths).

/// Escape codes per output role; all empty when styling is off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub block: &'static str,
    pub record: &'static str,
    pub abbrev: &'static str,
    pub meta: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        block: "\x1b[34m",
        record: "\x1b[32m",
        abbrev: "\x1b[35m",
        meta: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        block: "",
        record: "",
        abbrev: "",
        meta: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
