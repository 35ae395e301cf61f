//! NMR restraint file reader: a flat list of
//! ambiguous or unambiguous distance bounds between atom serial numbers,
//! one restraint per line: `serial1 serial2 lower upper [weight]`.

use crate::error::{CoreError, CoreResult, ParseError};

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceRestraint {
    pub atom1_serial: usize,
    pub atom2_serial: usize,
    pub lower: f64,
    pub upper: f64,
    pub weight: f64,
}

pub fn read_restraints(text: &str) -> CoreResult<Vec<DistanceRestraint>> {
    let mut restraints = Vec::new();
    for (lineno, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(bad_line(lineno, "expected at least 4 fields"));
        }
        let atom1_serial: usize = fields[0].parse().map_err(|_| bad_line(lineno, "atom1 serial"))?;
        let atom2_serial: usize = fields[1].parse().map_err(|_| bad_line(lineno, "atom2 serial"))?;
        let lower: f64 = fields[2].parse().map_err(|_| bad_line(lineno, "lower bound"))?;
        let upper: f64 = fields[3].parse().map_err(|_| bad_line(lineno, "upper bound"))?;
        if lower > upper {
            return Err(CoreError::InvalidRequest(format!(
                "line {}: restraint lower bound {lower} exceeds upper bound {upper}",
                lineno + 1
            )));
        }
        let weight: f64 = fields.get(4).and_then(|s| s.parse().ok()).unwrap_or(1.0);
        restraints.push(DistanceRestraint {
            atom1_serial,
            atom2_serial,
            lower,
            upper,
            weight,
        });
    }
    Ok(restraints)
}

fn bad_line(lineno: usize, detail: &str) -> CoreError {
    CoreError::ParseFailure(ParseError::BadField {
        context: "NMR restraint file".into(),
        field: "record".into(),
        line: lineno + 1,
        detail: detail.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_restraints_with_default_weight() {
        let restraints = read_restraints("1 5 2.0 5.0\n2 6 1.5 4.0 0.5\n").unwrap();
        assert_eq!(restraints.len(), 2);
        assert_eq!(restraints[0].weight, 1.0);
        assert_eq!(restraints[1].weight, 0.5);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = read_restraints("1 5 9.0 2.0\n").unwrap_err();
        assert!(matches!(err, CoreError::InvalidRequest(_)));
    }
}
