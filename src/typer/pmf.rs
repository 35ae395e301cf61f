//! PMF (potential-of-mean-force) atom typer.
//!
//! PMF typing is underspecified relative to Tripos/HHS, and scoring
//! consumes only Tripos types. This keeps a compact, element-driven enum
//! so `Atom::pmf_type` has somewhere to live without inventing a
//! classification scheme nothing downstream actually reads yet.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PmfType {
    CF,
    CP,
    CW,
    NF,
    NP,
    OC,
    OA,
    OE,
    OW,
    SD,
    P,
    HL,
    HH,
    Za,
    Du,
    Undefined,
}

impl PmfType {
    pub fn name(self) -> &'static str {
        match self {
            PmfType::CF => "CF",
            PmfType::CP => "CP",
            PmfType::CW => "CW",
            PmfType::NF => "NF",
            PmfType::NP => "NP",
            PmfType::OC => "OC",
            PmfType::OA => "OA",
            PmfType::OE => "OE",
            PmfType::OW => "OW",
            PmfType::SD => "SD",
            PmfType::P => "P",
            PmfType::HL => "HL",
            PmfType::HH => "HH",
            PmfType::Za => "Za",
            PmfType::Du => "Du",
            PmfType::Undefined => "Und",
        }
    }

    /// Coarse fallback from atomic number alone, used when no richer
    /// context is available (e.g. reading a foreign file format that
    /// carries no PMF annotation).
    pub fn from_atomic_no(atomic_no: u32) -> PmfType {
        match atomic_no {
            6 => PmfType::CF,
            7 => PmfType::NF,
            8 => PmfType::OC,
            16 => PmfType::SD,
            15 => PmfType::P,
            1 => PmfType::HL,
            _ => PmfType::Undefined,
        }
    }
}

impl fmt::Display for PmfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PmfType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use PmfType::*;
        Ok(match s {
            "CF" => CF,
            "CP" => CP,
            "CW" => CW,
            "NF" => NF,
            "NP" => NP,
            "OC" => OC,
            "OA" => OA,
            "OE" => OE,
            "OW" => OW,
            "SD" => SD,
            "P" => P,
            "HL" => HL,
            "HH" => HH,
            "Za" => Za,
            "Du" => Du,
            _ => return Err(()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_atomic_no_covers_common_elements() {
        assert_eq!(PmfType::from_atomic_no(6), PmfType::CF);
        assert_eq!(PmfType::from_atomic_no(99), PmfType::Undefined);
    }

    #[test]
    fn name_roundtrips() {
        for ty in [PmfType::CF, PmfType::OA, PmfType::Za] {
            assert_eq!(PmfType::from_str(ty.name()).unwrap(), ty);
        }
    }
}
