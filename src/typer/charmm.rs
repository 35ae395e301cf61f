//! CHARMM mass-file adapter.
//!
//! CHARMM `MASS` records carry a free-text comment that conventionally
//! embeds a hybridization sentinel such as `(RBT::SP2)`; this adapter reads
//! the fixed fields and scans the comment for those sentinels so the rest
//! of the crate never has to re-parse the record format.

use crate::error::{CoreError, CoreResult, ParseError};
use crate::model::Hybridization;

#[derive(Debug, Clone)]
pub struct CharmmRecord {
    pub type_number: i32,
    pub type_name: String,
    pub mass: f64,
    pub element_symbol: String,
    pub free_comment: String,
    pub hybrid: Hybridization,
}

fn hybrid_from_comment(comment: &str) -> Hybridization {
    if comment.contains("(RBT::SP2)") {
        Hybridization::Sp2
    } else if comment.contains("(RBT::SP3)") {
        Hybridization::Sp3
    } else if comment.contains("(RBT::SP)") {
        Hybridization::Sp
    } else if comment.contains("(RBT::AROM)") {
        Hybridization::Arom
    } else if comment.contains("(RBT::TRI)") {
        Hybridization::Tri
    } else {
        Hybridization::Undef
    }
}

pub struct CharmmMassesAdapter;

impl CharmmMassesAdapter {
    /// Parses a CHARMM mass-file text body. Lines are expected as
    /// `MASS <typeNumber> <typeName> <mass> <elementSymbol> [! comment]`;
    /// blank lines and lines starting with `*` or `!` are skipped.
    pub fn parse(text: &str) -> CoreResult<Vec<CharmmRecord>> {
        let mut records = Vec::new();
        for (lineno, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('*') || line.starts_with('!') {
                continue;
            }
            let (body, comment) = match line.split_once('!') {
                Some((b, c)) => (b.trim(), c.trim()),
                None => (line, ""),
            };
            let mut fields = body.split_whitespace();
            let keyword = fields.next().ok_or_else(|| {
                CoreError::ParseFailure(ParseError::CorruptCounts {
                    context: "charmm masses".into(),
                    line: lineno + 1,
                })
            })?;
            if !keyword.eq_ignore_ascii_case("MASS") {
                continue;
            }
            let type_number: i32 = fields
                .next()
                .ok_or_else(|| field_missing(lineno, "typeNumber"))?
                .parse()
                .map_err(|_| field_bad(lineno, "typeNumber"))?;
            let type_name = fields.next().ok_or_else(|| field_missing(lineno, "typeName"))?.to_string();
            let mass: f64 = fields
                .next()
                .ok_or_else(|| field_missing(lineno, "mass"))?
                .parse()
                .map_err(|_| field_bad(lineno, "mass"))?;
            let element_symbol = fields.next().unwrap_or("").to_string();

            records.push(CharmmRecord {
                type_number,
                type_name,
                mass,
                element_symbol,
                hybrid: hybrid_from_comment(comment),
                free_comment: comment.to_string(),
            });
        }
        Ok(records)
    }
}

fn field_missing(lineno: usize, field: &'static str) -> CoreError {
    CoreError::ParseFailure(ParseError::BadField {
        context: "charmm masses".into(),
        field: field.into(),
        line: lineno + 1,
        detail: "missing field".to_string(),
    })
}

fn field_bad(lineno: usize, field: &'static str) -> CoreError {
    CoreError::ParseFailure(ParseError::BadField {
        context: "charmm masses".into(),
        field: field.into(),
        line: lineno + 1,
        detail: "not a number".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
* CHARMM masses
MASS 1 CT1 12.011 C ! (RBT::SP3) aliphatic sp3 carbon
MASS 2 CA  12.011 C ! (RBT::AROM) aromatic carbon
MASS 3 HB1  1.008 H
";

    #[test]
    fn parses_records_and_hybrid_sentinels() {
        let records = CharmmMassesAdapter::parse(SAMPLE).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].type_name, "CT1");
        assert_eq!(records[0].hybrid, Hybridization::Sp3);
        assert_eq!(records[1].hybrid, Hybridization::Arom);
        assert_eq!(records[2].hybrid, Hybridization::Undef);
        assert!((records[0].mass - 12.011).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_numeric_mass() {
        let bad = "MASS 1 CT1 notanumber C\n";
        let err = CharmmMassesAdapter::parse(bad).unwrap_err();
        assert!(matches!(err, CoreError::ParseFailure(_)));
    }
}
