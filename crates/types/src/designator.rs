//! Font-source designators.
//!
//! A designator names a storage location for fonts. The declaration order of
//! [`Designator`] is the fixed descending priority used when falling back
//! from one source to another: `I` is the highest priority and `M4` the
//! lowest.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Designator {
    /// `I`: internal fonts, assumed always populated.
    Internal,
    /// `C`: cartridge.
    Cartridge,
    /// `C1`: first cartridge slot.
    Cartridge1,
    /// `C2`: second cartridge slot.
    Cartridge2,
    /// `S`: permanent soft (downloaded) fonts.
    SoftFonts,
    /// `M1` .. `M4`: ROM SIMM slots.
    Rom1,
    Rom2,
    Rom3,
    Rom4,
}

impl Designator {
    /// All designators in descending priority order.
    pub const ALL: [Designator; 9] = [
        Designator::Internal,
        Designator::Cartridge,
        Designator::Cartridge1,
        Designator::Cartridge2,
        Designator::SoftFonts,
        Designator::Rom1,
        Designator::Rom2,
        Designator::Rom3,
        Designator::Rom4,
    ];

    /// The one- or two-character PJL code for this designator.
    pub fn code(self) -> &'static str {
        match self {
            Designator::Internal => "I",
            Designator::Cartridge => "C",
            Designator::Cartridge1 => "C1",
            Designator::Cartridge2 => "C2",
            Designator::SoftFonts => "S",
            Designator::Rom1 => "M1",
            Designator::Rom2 => "M2",
            Designator::Rom3 => "M3",
            Designator::Rom4 => "M4",
        }
    }

    /// Position in the priority table; `0` is `I`.
    pub fn priority_index(self) -> usize {
        self as usize
    }

    /// Looks a designator up by its PJL code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.code().eq_ignore_ascii_case(code))
    }
}

impl FromStr for Designator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unknown font source designator '{}'", s))
    }
}

impl fmt::Display for Designator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
