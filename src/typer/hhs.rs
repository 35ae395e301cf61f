//! HHS solvation typer: types by element + hybridization +
//! ionic state + coordination pattern, with a bidirectional name↔enum
//! mapping.

use std::fmt;
use std::str::FromStr;

use crate::model::Hybridization;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HhsType {
    CSp3,
    CSp2,
    /// Guanidinium carbon.
    CSp2p,
    CSp,
    CArom,
    NSp3,
    NSp2,
    /// Ammonium-like cationic nitrogen.
    NSp3p,
    NArom,
    NAm,
    OSp3,
    OSp2,
    /// Carboxylate-like oxygen.
    OCo2,
    /// Nitro oxygen.
    ON,
    /// Water oxygen.
    OW,
    SSp3,
    SSp2,
    P,
    F,
    Cl,
    Br,
    I,
    /// Ordinary nonpolar hydrogen.
    H,
    /// Polar hydrogen bonded to an electronegative heavy atom.
    HP,
    /// NH+ hydrogen.
    HNp,
    Metal,
    Undefined,
}

impl HhsType {
    pub fn name(self) -> &'static str {
        match self {
            HhsType::CSp3 => "C_sp3",
            HhsType::CSp2 => "C_sp2",
            HhsType::CSp2p => "C_sp2p",
            HhsType::CSp => "C_sp",
            HhsType::CArom => "C_arom",
            HhsType::NSp3 => "N_sp3",
            HhsType::NSp2 => "N_sp2",
            HhsType::NSp3p => "N_sp3p",
            HhsType::NArom => "N_arom",
            HhsType::NAm => "N_am",
            HhsType::OSp3 => "O_sp3",
            HhsType::OSp2 => "O_sp2",
            HhsType::OCo2 => "O_co2",
            HhsType::ON => "ON",
            HhsType::OW => "OW",
            HhsType::SSp3 => "S_sp3",
            HhsType::SSp2 => "S_sp2",
            HhsType::P => "P",
            HhsType::F => "F",
            HhsType::Cl => "Cl",
            HhsType::Br => "Br",
            HhsType::I => "I",
            HhsType::H => "H",
            HhsType::HP => "HP",
            HhsType::HNp => "HNp",
            HhsType::Metal => "Metal",
            HhsType::Undefined => "Und",
        }
    }
}

impl fmt::Display for HhsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for HhsType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use HhsType::*;
        Ok(match s {
            "C_sp3" => CSp3,
            "C_sp2" => CSp2,
            "C_sp2p" => CSp2p,
            "C_sp" => CSp,
            "C_arom" => CArom,
            "N_sp3" => NSp3,
            "N_sp2" => NSp2,
            "N_sp3p" => NSp3p,
            "N_arom" => NArom,
            "N_am" => NAm,
            "O_sp3" => OSp3,
            "O_sp2" => OSp2,
            "O_co2" => OCo2,
            "ON" => ON,
            "OW" => OW,
            "S_sp3" => SSp3,
            "S_sp2" => SSp2,
            "P" => P,
            "F" => F,
            "Cl" => Cl,
            "Br" => Br,
            "I" => I,
            "H" => H,
            "HP" => HP,
            "HNp" => HNp,
            "Metal" => Metal,
            _ => return Err(()),
        })
    }
}

/// Context gathered by the caller, mirroring `TriposContext`.
#[derive(Debug, Clone)]
pub struct HhsContext {
    pub atomic_no: u32,
    pub hybrid: Hybridization,
    pub group_charge: f64,
    pub is_guanidinium_carbon: bool,
    pub is_water: bool,
    pub is_nitro_oxygen: bool,
    pub is_carboxylate_oxygen: bool,
    pub is_amide_nitrogen: bool,
    pub is_cationic_nitrogen: bool,
    pub bonded_to_cationic_n: bool,
}

pub fn classify(ctx: &HhsContext) -> HhsType {
    use Hybridization::*;

    if ctx.atomic_no == 1 {
        return if ctx.bonded_to_cationic_n {
            HhsType::HNp
        } else {
            HhsType::H
        };
    }

    match ctx.atomic_no {
        6 if ctx.is_guanidinium_carbon => HhsType::CSp2p,
        6 => match ctx.hybrid {
            Sp3 => HhsType::CSp3,
            Sp2 | Tri => HhsType::CSp2,
            Sp => HhsType::CSp,
            Arom => HhsType::CArom,
            Undef => HhsType::Undefined,
        },
        7 if ctx.is_amide_nitrogen => HhsType::NAm,
        7 if ctx.is_cationic_nitrogen => HhsType::NSp3p,
        7 => match ctx.hybrid {
            Sp3 => HhsType::NSp3,
            Sp2 | Tri => HhsType::NSp2,
            Arom => HhsType::NArom,
            _ => HhsType::Undefined,
        },
        8 if ctx.is_water => HhsType::OW,
        8 if ctx.is_nitro_oxygen => HhsType::ON,
        8 if ctx.is_carboxylate_oxygen => HhsType::OCo2,
        8 => match ctx.hybrid {
            Sp3 => HhsType::OSp3,
            Sp2 => HhsType::OSp2,
            _ => HhsType::Undefined,
        },
        16 => match ctx.hybrid {
            Sp3 => HhsType::SSp3,
            Sp2 => HhsType::SSp2,
            _ => HhsType::Undefined,
        },
        15 => HhsType::P,
        9 => HhsType::F,
        17 => HhsType::Cl,
        35 => HhsType::Br,
        53 => HhsType::I,
        _ => HhsType::Undefined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_oxygen_types_as_ow() {
        let ctx = HhsContext {
            atomic_no: 8,
            hybrid: Hybridization::Sp3,
            group_charge: 0.0,
            is_guanidinium_carbon: false,
            is_water: true,
            is_nitro_oxygen: false,
            is_carboxylate_oxygen: false,
            is_amide_nitrogen: false,
            is_cationic_nitrogen: false,
            bonded_to_cationic_n: false,
        };
        assert_eq!(classify(&ctx), HhsType::OW);
    }

    #[test]
    fn name_roundtrips() {
        for ty in [HhsType::OW, HhsType::ON, HhsType::CSp2p, HhsType::HNp] {
            assert_eq!(HhsType::from_str(ty.name()).unwrap(), ty);
        }
    }
}
