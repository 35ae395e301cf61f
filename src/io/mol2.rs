//! MOL2 reader: `@<TRIPOS>MOLECULE` / `@<TRIPOS>ATOM` /
//! `@<TRIPOS>BOND` record sections into a [`Model`], carrying the Tripos
//! type string straight into `Atom::tripos_type` since MOL2 is the one
//! format that already hands us that classification.

use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ParseError};
use crate::geometry::Coord;
use crate::model::bond::FormalBondOrder;
use crate::model::{AtomId, Model};
use crate::typer::TriposType;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Section {
    None,
    Molecule,
    Atom,
    Bond,
}

fn bond_order_from_mol2(token: &str) -> FormalBondOrder {
    match token {
        "1" => FormalBondOrder::Single,
        "2" => FormalBondOrder::Double,
        "3" => FormalBondOrder::Triple,
        "ar" | "am" | "du" | "un" => FormalBondOrder::Aromatic,
        _ => FormalBondOrder::Single,
    }
}

/// Reads one `@<TRIPOS>MOLECULE` record's worth of text into a fresh
/// `Model`. Multi-molecule MOL2 streams are out of scope.
pub fn read_mol2(text: &str) -> CoreResult<Model> {
    let mut model = Model::new();
    let mut section = Section::None;
    let mut atom_index_to_id: Vec<AtomId> = Vec::new();
    let mut n_atoms = None;
    let mut n_bonds = None;
    let mut molecule_line = 0usize;

    for (lineno, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim_end();
        if line.starts_with("@<TRIPOS>") {
            section = match &line[9..] {
                "MOLECULE" => Section::Molecule,
                "ATOM" => Section::Atom,
                "BOND" => Section::Bond,
                _ => Section::None,
            };
            molecule_line = 0;
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        match section {
            Section::Molecule => {
                molecule_line += 1;
                if molecule_line == 1 {
                    model.titles.push(line.trim().to_string());
                } else if molecule_line == 2 {
                    let mut fields = line.split_whitespace();
                    n_atoms = fields.next().and_then(|s| s.parse::<usize>().ok());
                    n_bonds = fields.next().and_then(|s| s.parse::<usize>().ok());
                }
            }
            Section::Atom => {
                let fields: Vec<&str> = line.split_whitespace().collect();
                if fields.len() < 6 {
                    return Err(CoreError::ParseFailure(ParseError::BadField {
                        context: "MOL2 ATOM record".into(),
                        field: "record".into(),
                        line: lineno,
                        detail: format!("expected at least 6 fields, found {}", fields.len()),
                    }));
                }
                let name = fields[1].to_string();
                let x: f64 = parse_field(lineno, "x", fields[2])?;
                let y: f64 = parse_field(lineno, "y", fields[3])?;
                let z: f64 = parse_field(lineno, "z", fields[4])?;
                let tripos = TriposType::from_str(fields[5]).unwrap_or(TriposType::Undefined);
                let atomic_no = atomic_no_from_tripos(tripos, fields[5]);

                let id = model.add_atom(atomic_no, name, Coord::new(x, y, z));
                if let Some(atom) = model.atom_mut(id) {
                    atom.tripos_type = Some(tripos);
                    if fields.len() >= 9 {
                        atom.partial_charge = fields[8].parse().unwrap_or(0.0);
                    }
                }
                atom_index_to_id.push(id);
            }
            Section::Bond => {
                let fields: Vec<&str> = line.split_whitespace().collect();
                if fields.len() < 4 {
                    return Err(CoreError::ParseFailure(ParseError::BadField {
                        context: "MOL2 BOND record".into(),
                        field: "record".into(),
                        line: lineno,
                        detail: format!("expected at least 4 fields, found {}", fields.len()),
                    }));
                }
                let origin: usize = parse_field(lineno, "origin atom", fields[1])?;
                let target: usize = parse_field(lineno, "target atom", fields[2])?;
                let (Some(&a1), Some(&a2)) = (
                    atom_index_to_id.get(origin.wrapping_sub(1)),
                    atom_index_to_id.get(target.wrapping_sub(1)),
                ) else {
                    return Err(CoreError::ParseFailure(ParseError::BadField {
                        context: "MOL2 BOND record".into(),
                        field: "atom index".into(),
                        line: lineno,
                        detail: format!("index out of range (origin {origin}, target {target})"),
                    }));
                };
                model.construct_bond(a1, a2, bond_order_from_mol2(fields[3]))?;
            }
            Section::None => {}
        }
    }

    if let Some(expected) = n_atoms {
        if model.atom_count() != expected {
            return Err(CoreError::ParseFailure(ParseError::CorruptCounts {
                context: "MOL2 MOLECULE record".into(),
                line: 0,
            }));
        }
    }
    if let Some(expected) = n_bonds {
        if model.bond_count() != expected {
            return Err(CoreError::ParseFailure(ParseError::CorruptCounts {
                context: "MOL2 MOLECULE record".into(),
                line: 0,
            }));
        }
    }

    Ok(model)
}

fn atomic_no_from_tripos(ty: TriposType, raw: &str) -> u32 {
    let symbol = raw.split('.').next().unwrap_or(raw);
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
        _ => match ty {
            TriposType::Metal => 0,
            _ => 0,
        },
    }
}

fn parse_field<T: std::str::FromStr>(line: usize, field: &str, token: &str) -> CoreResult<T> {
    token.parse::<T>().map_err(|_| {
        CoreError::ParseFailure(ParseError::BadField {
            context: "MOL2 record".into(),
            field: field.to_string(),
            line,
            detail: format!("could not parse '{token}'"),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
@<TRIPOS>MOLECULE
small_ligand
3 2 0 0 0
SMALL
NO_CHARGES
@<TRIPOS>ATOM
1 C1 0.000 0.000 0.000 C.3 1 LIG1 0.0
2 C2 1.500 0.000 0.000 C.3 1 LIG1 0.0
3 O1 3.000 0.000 0.000 O.3 1 LIG1 -0.4
@<TRIPOS>BOND
1 1 2 1
2 2 3 1
";

    #[test]
    fn parses_atoms_bonds_and_tripos_types() {
        let model = read_mol2(SAMPLE).unwrap();
        assert_eq!(model.atom_count(), 3);
        assert_eq!(model.bond_count(), 2);
        assert_eq!(model.titles[0], "small_ligand");
    }

    #[test]
    fn rejects_bond_referencing_out_of_range_atom() {
        let bad = SAMPLE.replace("2 2 3 1", "2 2 9 1");
        let err = read_mol2(&bad).unwrap_err();
        assert!(matches!(err, CoreError::ParseFailure(_)));
    }

    #[test]
    fn rejects_atom_count_mismatch() {
        let bad = SAMPLE.replace("3 2 0 0 0", "99 2 0 0 0");
        let err = read_mol2(&bad).unwrap_err();
        assert!(matches!(err, CoreError::ParseFailure(_)));
    }
}
