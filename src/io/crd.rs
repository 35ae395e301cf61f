//! CHARMM coordinate (CRD) reader: title block, atom
//! count, then one fixed-field line per atom. Pairs with [`crate::io::psf`]
//! — a CRD carries no topology, only coordinates in atom-index order.

use crate::error::{CoreError, CoreResult, ParseError};
use crate::geometry::Coord;

#[derive(Debug, Clone)]
pub struct CrdRecord {
    pub serial: usize,
    pub resno: i32,
    pub resname: String,
    pub atomname: String,
    pub coord: Coord,
    pub segname: String,
}

/// Parses a CHARMM CRD file into an ordered list of records; applying them
/// to a `Model` (matching by atom index) is the caller's job since the CRD
/// format itself says nothing about bonds.
pub fn read_crd(text: &str) -> CoreResult<Vec<CrdRecord>> {
    let mut lines = text.lines();
    let mut count_line = None;
    for line in &mut lines {
        let trimmed = line.trim();
        if trimmed.starts_with('*') || trimmed.is_empty() {
            continue;
        }
        count_line = Some(trimmed);
        break;
    }
    let count_line = count_line.ok_or_else(|| {
        CoreError::ParseFailure(ParseError::MissingRecord {
            context: "CRD".into(),
            record: "atom count line".into(),
        })
    })?;
    let n_atoms: usize = count_line
        .split_whitespace()
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CoreError::ParseFailure(ParseError::CorruptCounts {
            context: "CRD".into(),
            line: 0,
        }))?;

    let mut records = Vec::with_capacity(n_atoms);
    for i in 0..n_atoms {
        let line = lines.next().ok_or_else(|| bad_atom(i))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 8 {
            return Err(bad_atom(i));
        }
        let serial: usize = fields[0].parse().map_err(|_| bad_atom(i))?;
        let resno: i32 = fields[1].parse().map_err(|_| bad_atom(i))?;
        let resname = fields[2].to_string();
        let atomname = fields[3].to_string();
        let x: f64 = fields[4].parse().map_err(|_| bad_atom(i))?;
        let y: f64 = fields[5].parse().map_err(|_| bad_atom(i))?;
        let z: f64 = fields[6].parse().map_err(|_| bad_atom(i))?;
        let segname = fields[7].to_string();
        records.push(CrdRecord {
            serial,
            resno,
            resname,
            atomname,
            coord: Coord::new(x, y, z),
            segname,
        });
    }
    Ok(records)
}

fn bad_atom(i: usize) -> CoreError {
    CoreError::ParseFailure(ParseError::BadField {
        context: "CRD atom record".into(),
        field: "record".into(),
        line: i + 1,
        detail: "missing or short atom line".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
* generated
*
    2
    1    1 ALA  N     0.00000   1.00000   2.00000 A    1      0.00000
    2    1 ALA  CA    1.50000   1.00000   2.00000 A    1      0.00000
";

    #[test]
    fn parses_title_count_and_records() {
        let records = read_crd(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].atomname, "N");
        assert_eq!(records[1].coord, Coord::new(1.5, 1.0, 2.0));
    }

    #[test]
    fn rejects_short_record() {
        let bad = "* t\n*\n1\n1 1 ALA N\n";
        assert!(read_crd(bad).is_err());
    }
}
