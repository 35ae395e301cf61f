//! SD file (V2000 MOL block) reader. Same atom/bond shape as
//! MOL2 but fixed-width counts-line and column-positional atom/bond blocks,
//! per the venerable CTAB format.

use crate::error::{CoreError, CoreResult, ParseError};
use crate::geometry::Coord;
use crate::model::bond::FormalBondOrder;
use crate::model::{AtomId, Model};

fn element_to_atomic_no(symbol: &str) -> u32 {
    match symbol {
        "C" => 6,
        "N" => 7,
        "O" => 8,
        "S" => 16,
        "P" => 15,
        "F" => 9,
        "Cl" => 17,
        "Br" => 35,
        "I" => 53,
        "H" => 1,
        _ => 0,
    }
}

fn bond_order_from_sdf(code: u32) -> FormalBondOrder {
    match code {
        2 => FormalBondOrder::Double,
        3 => FormalBondOrder::Triple,
        4 => FormalBondOrder::Aromatic,
        _ => FormalBondOrder::Single,
    }
}

/// Reads a single V2000 CTAB block: three header lines, then the counts
/// line (`aaabbb...V2000`), then `aaa` atom lines and `bbb` bond lines.
pub fn read_sdf(text: &str) -> CoreResult<Model> {
    let mut model = Model::new();
    let mut lines = text.lines();

    let title = lines.next().unwrap_or("").trim().to_string();
    if !title.is_empty() {
        model.titles.push(title);
    }
    let _program_line = lines.next();
    let _comment_line = lines.next();

    let counts_line = lines
        .next()
        .ok_or_else(|| CoreError::ParseFailure(ParseError::MissingRecord {
            context: "SDF CTAB".into(),
            record: "counts line".into(),
        }))?;
    if counts_line.len() < 6 {
        return Err(CoreError::ParseFailure(ParseError::CorruptCounts {
            context: "SDF CTAB".into(),
            line: 4,
        }));
    }
    let n_atoms: usize = counts_line[0..3].trim().parse().map_err(|_| {
        CoreError::ParseFailure(ParseError::CorruptCounts {
            context: "SDF CTAB".into(),
            line: 4,
        })
    })?;
    let n_bonds: usize = counts_line[3..6].trim().parse().map_err(|_| {
        CoreError::ParseFailure(ParseError::CorruptCounts {
            context: "SDF CTAB".into(),
            line: 4,
        })
    })?;

    let mut atom_ids: Vec<AtomId> = Vec::with_capacity(n_atoms);
    for i in 0..n_atoms {
        let line = lines.next().ok_or_else(|| missing_atom_line(i))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(missing_atom_line(i));
        }
        let x: f64 = fields[0].parse().map_err(|_| bad_atom_field(i, "x"))?;
        let y: f64 = fields[1].parse().map_err(|_| bad_atom_field(i, "y"))?;
        let z: f64 = fields[2].parse().map_err(|_| bad_atom_field(i, "z"))?;
        let symbol = fields[3];
        let id = model.add_atom(element_to_atomic_no(symbol), symbol, Coord::new(x, y, z));
        atom_ids.push(id);
    }

    for i in 0..n_bonds {
        let line = lines.next().ok_or_else(|| missing_bond_line(i))?;
        if line.len() < 9 {
            return Err(missing_bond_line(i));
        }
        let a1: usize = line[0..3].trim().parse().map_err(|_| bad_bond_field(i, "atom1"))?;
        let a2: usize = line[3..6].trim().parse().map_err(|_| bad_bond_field(i, "atom2"))?;
        let order: u32 = line[6..9].trim().parse().map_err(|_| bad_bond_field(i, "order"))?;
        let (Some(&id1), Some(&id2)) = (atom_ids.get(a1.wrapping_sub(1)), atom_ids.get(a2.wrapping_sub(1))) else {
            return Err(bad_bond_field(i, "atom index"));
        };
        model.construct_bond(id1, id2, bond_order_from_sdf(order))?;
    }

    Ok(model)
}

fn missing_atom_line(i: usize) -> CoreError {
    CoreError::ParseFailure(ParseError::BadField {
        context: "SDF atom block".into(),
        field: "record".into(),
        line: 4 + i + 1,
        detail: "missing or short atom line".into(),
    })
}

fn bad_atom_field(i: usize, field: &str) -> CoreError {
    CoreError::ParseFailure(ParseError::BadField {
        context: "SDF atom block".into(),
        field: field.to_string(),
        line: 4 + i + 1,
        detail: "could not parse".into(),
    })
}

fn missing_bond_line(i: usize) -> CoreError {
    CoreError::ParseFailure(ParseError::BadField {
        context: "SDF bond block".into(),
        field: "record".into(),
        line: i + 1,
        detail: "missing or short bond line".into(),
    })
}

fn bad_bond_field(i: usize, field: &str) -> CoreError {
    CoreError::ParseFailure(ParseError::BadField {
        context: "SDF bond block".into(),
        field: field.to_string(),
        line: i + 1,
        detail: "could not parse".into(),
    })
}
