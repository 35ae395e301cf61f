//! PSF topology reader: the `!NATOM` and `!NBOND` sections
//! of an X-PLOR/CHARMM protein structure file. Coordinates are not carried
//! in a PSF — callers pair this with a [`crate::io::crd`] read to get a
//! fully-coordinated `Model`.

use crate::error::{CoreError, CoreResult, ParseError};
use crate::geometry::Coord;
use crate::model::bond::FormalBondOrder;
use crate::model::{AtomId, Model};

/// Parses `!NATOM` and `!NBOND` sections. Every other PSF section
/// (`!NTHETA`, `!NPHI`, ...) is skipped — this core derives angles and
/// dihedrals itself from the bond graph rather than trusting a
/// PSF's own angle/dihedral lists.
pub fn read_psf(text: &str) -> CoreResult<Model> {
    let mut model = Model::new();
    let mut lines = text.lines().peekable();
    let mut atom_ids: Vec<AtomId> = Vec::new();

    while let Some(line) = lines.next() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_suffix("!NATOM") {
            let n_atoms: usize = rest.trim().parse().map_err(|_| {
                CoreError::ParseFailure(ParseError::CorruptCounts {
                    context: "PSF !NATOM".into(),
                    line: 0,
                })
            })?;
            for i in 0..n_atoms {
                let atom_line = lines.next().ok_or_else(|| missing_atom(i))?;
                let fields: Vec<&str> = atom_line.split_whitespace().collect();
                if fields.len() < 8 {
                    return Err(missing_atom(i));
                }
                let name = fields[4];
                let ff_type = fields[5];
                let mass: f64 = fields[7].parse().unwrap_or(0.0);
                let atomic_no = crate::io::sdf_element_guess(name);
                let id = model.add_atom(atomic_no, name, Coord::ZERO);
                if let Some(atom) = model.atom_mut(id) {
                    atom.ff_type = ff_type.to_string();
                    atom.atomic_mass = mass;
                    atom.segment_name = fields[1].to_string();
                    atom.subunit_name = fields[2].to_string();
                }
                atom_ids.push(id);
            }
        } else if let Some(rest) = trimmed.strip_suffix("!NBOND: bonds") {
            let n_bonds: usize = rest.trim().parse().map_err(|_| {
                CoreError::ParseFailure(ParseError::CorruptCounts {
                    context: "PSF !NBOND".into(),
                    line: 0,
                })
            })?;
            let mut read = 0;
            while read < n_bonds {
                let bond_line = lines.next().ok_or_else(|| missing_bond(read))?;
                let tokens: Vec<&str> = bond_line.split_whitespace().collect();
                for pair in tokens.chunks(2) {
                    if pair.len() < 2 {
                        break;
                    }
                    let a1: usize = pair[0].parse().map_err(|_| missing_bond(read))?;
                    let a2: usize = pair[1].parse().map_err(|_| missing_bond(read))?;
                    let (Some(&id1), Some(&id2)) = (atom_ids.get(a1.wrapping_sub(1)), atom_ids.get(a2.wrapping_sub(1))) else {
                        return Err(missing_bond(read));
                    };
                    model.construct_bond(id1, id2, FormalBondOrder::Single)?;
                    read += 1;
                }
            }
        }
    }

    Ok(model)
}

fn missing_atom(i: usize) -> CoreError {
    CoreError::ParseFailure(ParseError::BadField {
        context: "PSF !NATOM".into(),
        field: "record".into(),
        line: i + 1,
        detail: "missing or short atom line".into(),
    })
}

fn missing_bond(i: usize) -> CoreError {
    CoreError::ParseFailure(ParseError::BadField {
        context: "PSF !NBOND".into(),
        field: "record".into(),
        line: i + 1,
        detail: "missing or short bond pair".into(),
    })
}
