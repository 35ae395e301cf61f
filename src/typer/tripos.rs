//! Tripos (SYBYL) atom typer.
//!
//! A pure function from `(atomicNo, hybridization, bondMap, neighbors'
//! hybridizations, groupCharge)` to a [`TriposType`]. Extended types
//! (`C.3.H1`, `C.3.H2`, ...) are opt-in via `TriposContext::extended`.

use std::fmt;
use std::str::FromStr;

use crate::model::Hybridization;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TriposType {
    C3,
    C2,
    C1,
    Car,
    Ccat,
    C3H0,
    C3H1,
    C3H2,
    C3H3,
    N3,
    N2,
    N1,
    Nar,
    Nam,
    Npl3,
    N4,
    O3,
    O2,
    Oco2,
    S3,
    S2,
    So,
    So2,
    P3,
    F,
    Cl,
    Br,
    I,
    H,
    /// Polar hydrogen: a hydrogen bonded to N, O or S.
    Hp,
    Lp,
    Du,
    Metal,
    Undefined,
}

impl TriposType {
    pub fn name(self) -> &'static str {
        match self {
            TriposType::C3 => "C.3",
            TriposType::C2 => "C.2",
            TriposType::C1 => "C.1",
            TriposType::Car => "C.ar",
            TriposType::Ccat => "C.cat",
            TriposType::C3H0 => "C.3.H0",
            TriposType::C3H1 => "C.3.H1",
            TriposType::C3H2 => "C.3.H2",
            TriposType::C3H3 => "C.3.H3",
            TriposType::N3 => "N.3",
            TriposType::N2 => "N.2",
            TriposType::N1 => "N.1",
            TriposType::Nar => "N.ar",
            TriposType::Nam => "N.am",
            TriposType::Npl3 => "N.pl3",
            TriposType::N4 => "N.4",
            TriposType::O3 => "O.3",
            TriposType::O2 => "O.2",
            TriposType::Oco2 => "O.co2",
            TriposType::S3 => "S.3",
            TriposType::S2 => "S.2",
            TriposType::So => "S.o",
            TriposType::So2 => "S.o2",
            TriposType::P3 => "P.3",
            TriposType::F => "F",
            TriposType::Cl => "Cl",
            TriposType::Br => "Br",
            TriposType::I => "I",
            TriposType::H => "H",
            TriposType::Hp => "H.p",
            TriposType::Lp => "LP",
            TriposType::Du => "Du",
            TriposType::Metal => "Metal",
            TriposType::Undefined => "Und",
        }
    }
}

impl fmt::Display for TriposType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TriposType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use TriposType::*;
        Ok(match s {
            "C.3" => C3,
            "C.2" => C2,
            "C.1" => C1,
            "C.ar" => Car,
            "C.cat" => Ccat,
            "C.3.H0" => C3H0,
            "C.3.H1" => C3H1,
            "C.3.H2" => C3H2,
            "C.3.H3" => C3H3,
            "N.3" => N3,
            "N.2" => N2,
            "N.1" => N1,
            "N.ar" => Nar,
            "N.am" => Nam,
            "N.pl3" => Npl3,
            "N.4" => N4,
            "O.3" => O3,
            "O.2" => O2,
            "O.co2" => Oco2,
            "S.3" => S3,
            "S.2" => S2,
            "S.o" => So,
            "S.o2" => So2,
            "P.3" => P3,
            "F" => F,
            "Cl" => Cl,
            "Br" => Br,
            "I" => I,
            "H" => H,
            "H.p" => Hp,
            "LP" => Lp,
            "Du" => Du,
            "Metal" => Metal,
            _ => return Err(()),
        })
    }
}

/// Local context a typer needs; gathered by the caller from `Model`/`Atom`
/// state so this module stays a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct TriposContext {
    pub atomic_no: u32,
    pub hybrid: Hybridization,
    pub n_bonds: usize,
    pub n_implicit_h: u32,
    pub n_attached_h: u32,
    pub neighbor_atomic_nos: Vec<u32>,
    pub neighbor_hybrids: Vec<Hybridization>,
    pub group_charge: f64,
    pub is_hbond_donor_h: bool,
    pub is_nitro_terminal_o: bool,
    pub is_amide_n: bool,
    pub is_aromatic: bool,
    /// When true, sp3 carbons refine by attached-hydrogen count
    /// (`C.3.H1`, `C.3.H2`, ...).
    pub extended: bool,
}

/// Classify one atom. Returns `TriposType::Undefined` on any combination
/// the table doesn't recognize.
pub fn classify(ctx: &TriposContext) -> TriposType {
    use Hybridization::*;

    if ctx.atomic_no == 1 {
        return if ctx.is_hbond_donor_h {
            TriposType::Hp
        } else {
            TriposType::H
        };
    }

    match ctx.atomic_no {
        6 => classify_carbon(ctx),
        7 => classify_nitrogen(ctx),
        8 => classify_oxygen(ctx),
        16 => match ctx.hybrid {
            Sp3 => TriposType::S3,
            Sp2 => TriposType::S2,
            _ => TriposType::Undefined,
        },
        15 => TriposType::P3,
        9 => TriposType::F,
        17 => TriposType::Cl,
        35 => TriposType::Br,
        53 => TriposType::I,
        3 | 11 | 12 | 13 | 19 | 20 | 25 | 26 | 27 | 28 | 29 | 30 | 37 | 38 | 47 | 48 | 55 | 56 | 74 | 78 | 79 | 80 => {
            TriposType::Metal
        }
        _ => TriposType::Undefined,
    }
}

fn classify_carbon(ctx: &TriposContext) -> TriposType {
    use Hybridization::*;

    // C.cat: guanidinium-like carbon, three sp2 neighbors and a net
    // cationic group charge.
    if ctx.hybrid == Sp2
        && ctx.n_attached_h == 0
        && ctx.neighbor_hybrids.iter().filter(|h| **h == Sp2).count() >= 3
        && ctx.group_charge > 0.5
    {
        return TriposType::Ccat;
    }

    match ctx.hybrid {
        Sp3 => {
            if ctx.extended {
                match ctx.n_attached_h {
                    0 => TriposType::C3H0,
                    1 => TriposType::C3H1,
                    2 => TriposType::C3H2,
                    _ => TriposType::C3H3,
                }
            } else {
                TriposType::C3
            }
        }
        Sp2 => TriposType::C2,
        Sp => TriposType::C1,
        Arom => TriposType::Car,
        Tri => TriposType::C2,
        Undef => TriposType::Undefined,
    }
}

fn classify_nitrogen(ctx: &TriposContext) -> TriposType {
    use Hybridization::*;

    if ctx.n_bonds + ctx.n_implicit_h as usize == 4 {
        return TriposType::N4;
    }
    if ctx.is_amide_n {
        return TriposType::Nam;
    }
    match ctx.hybrid {
        Sp3 => TriposType::N3,
        Sp2 => TriposType::Npl3,
        Sp => TriposType::N1,
        Arom => TriposType::Nar,
        Tri => TriposType::Npl3,
        Undef => TriposType::Undefined,
    }
}

fn classify_oxygen(ctx: &TriposContext) -> TriposType {
    use Hybridization::*;

    // O.co2: anionic carboxylate/sulfonate-like oxygen.
    if ctx.group_charge.abs() > 0.5 && ctx.n_bonds <= 1 {
        return TriposType::Oco2;
    }
    // Terminal O bonded only to N (nitro) maps to O.2.
    if ctx.is_nitro_terminal_o {
        return TriposType::O2;
    }
    match ctx.hybrid {
        Sp3 => TriposType::O3,
        Sp2 => TriposType::O2,
        _ => TriposType::Undefined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_ctx() -> TriposContext {
        TriposContext {
            atomic_no: 6,
            hybrid: Hybridization::Sp3,
            n_bonds: 4,
            n_implicit_h: 0,
            n_attached_h: 0,
            neighbor_atomic_nos: vec![],
            neighbor_hybrids: vec![],
            group_charge: 0.0,
            is_hbond_donor_h: false,
            is_nitro_terminal_o: false,
            is_amide_n: false,
            is_aromatic: false,
            extended: false,
        }
    }

    #[test]
    fn s2_cationic_carbon_is_ccat() {
        let mut ctx = base_ctx();
        ctx.hybrid = Hybridization::Sp2;
        ctx.neighbor_hybrids = vec![Hybridization::Sp2, Hybridization::Sp2, Hybridization::Sp2];
        ctx.group_charge = 1.0;
        assert_eq!(classify(&ctx), TriposType::Ccat);
    }

    #[test]
    fn s2_anionic_oxygen_is_oco2() {
        let mut ctx = base_ctx();
        ctx.atomic_no = 8;
        ctx.hybrid = Hybridization::Sp2;
        ctx.n_bonds = 1;
        ctx.group_charge = -1.0;
        assert_eq!(classify(&ctx), TriposType::Oco2);
    }

    #[test]
    fn s2_four_bonded_nitrogen_is_n4() {
        let mut ctx = base_ctx();
        ctx.atomic_no = 7;
        ctx.n_bonds = 4;
        assert_eq!(classify(&ctx), TriposType::N4);
    }

    #[test]
    fn extended_sp3_carbon_refines_by_hydrogen_count() {
        let mut ctx = base_ctx();
        ctx.extended = true;
        ctx.n_attached_h = 2;
        assert_eq!(classify(&ctx), TriposType::C3H2);
    }

    #[test]
    fn polar_hydrogen_retypes_to_hp() {
        let mut ctx = base_ctx();
        ctx.atomic_no = 1;
        ctx.is_hbond_donor_h = true;
        assert_eq!(classify(&ctx), TriposType::Hp);
    }

    #[test]
    fn name_roundtrips_through_from_str() {
        for ty in [TriposType::C3, TriposType::Nam, TriposType::Oco2, TriposType::Hp] {
            assert_eq!(TriposType::from_str(ty.name()).unwrap(), ty);
        }
    }
}
