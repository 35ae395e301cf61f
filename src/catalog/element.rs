//! Element dictionary: atomic number → (mass, vdW radius, valence limits).
//!
//! Parsed from the `ELEMENT` records of an element file. Lookups are by
//! atomic number (the canonical key) or by element name (for file formats,
//! like MOL2, that carry a symbol instead of a number).

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::error::{CoreError, CoreResult, ParseError};

lazy_static! {
    /// Compiled-in fallback covering the handful of elements that show up
    /// in nearly every docking run, so a `Model` can still be typed and
    /// scored before any element file has been read.
    static ref FALLBACK_ELEMENTS: Vec<ElementRecord> = vec![
        ElementRecord { atomic_no: 1, name: "H".into(), min_valence: 1, max_valence: 1, common_valence: 1, mass: 1.008, vdw_radius: 1.20 },
        ElementRecord { atomic_no: 6, name: "C".into(), min_valence: 2, max_valence: 4, common_valence: 4, mass: 12.011, vdw_radius: 1.70 },
        ElementRecord { atomic_no: 7, name: "N".into(), min_valence: 1, max_valence: 4, common_valence: 3, mass: 14.007, vdw_radius: 1.55 },
        ElementRecord { atomic_no: 8, name: "O".into(), min_valence: 1, max_valence: 2, common_valence: 2, mass: 15.999, vdw_radius: 1.52 },
        ElementRecord { atomic_no: 9, name: "F".into(), min_valence: 1, max_valence: 1, common_valence: 1, mass: 18.998, vdw_radius: 1.47 },
        ElementRecord { atomic_no: 15, name: "P".into(), min_valence: 2, max_valence: 5, common_valence: 5, mass: 30.974, vdw_radius: 1.80 },
        ElementRecord { atomic_no: 16, name: "S".into(), min_valence: 1, max_valence: 6, common_valence: 2, mass: 32.06, vdw_radius: 1.80 },
        ElementRecord { atomic_no: 17, name: "Cl".into(), min_valence: 1, max_valence: 1, common_valence: 1, mass: 35.45, vdw_radius: 1.75 },
        ElementRecord { atomic_no: 35, name: "Br".into(), min_valence: 1, max_valence: 1, common_valence: 1, mass: 79.904, vdw_radius: 1.85 },
        ElementRecord { atomic_no: 53, name: "I".into(), min_valence: 1, max_valence: 1, common_valence: 1, mass: 126.904, vdw_radius: 1.98 },
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord {
    pub atomic_no: u32,
    pub name: String,
    pub min_valence: u32,
    pub max_valence: u32,
    pub common_valence: u32,
    pub mass: f64,
    pub vdw_radius: f64,
}

/// Read-once immutable dictionary, shared by every `Model` built during a
/// run.
#[derive(Debug, Clone, Default)]
pub struct ElementCatalog {
    by_atomic_no: HashMap<u32, ElementRecord>,
    by_name: HashMap<String, u32>,
    pub hbond_radius_increment: f64,
    pub implicit_radius_increment: f64,
}

impl ElementCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the catalog with the compiled-in fallback table covering the
    /// handful of elements every run needs, without requiring an element
    /// file on disk first.
    pub fn with_builtin_defaults() -> Self {
        let mut catalog = Self::new();
        for record in FALLBACK_ELEMENTS.iter() {
            catalog.insert(record.clone());
        }
        catalog
    }

    pub fn insert(&mut self, record: ElementRecord) {
        self.by_name
            .insert(record.name.to_uppercase(), record.atomic_no);
        self.by_atomic_no.insert(record.atomic_no, record);
    }

    pub fn get(&self, atomic_no: u32) -> Option<&ElementRecord> {
        self.by_atomic_no.get(&atomic_no)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&ElementRecord> {
        self.by_name
            .get(&name.to_uppercase())
            .and_then(|no| self.by_atomic_no.get(no))
    }

    pub fn len(&self) -> usize {
        self.by_atomic_no.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_atomic_no.is_empty()
    }

    /// Parse the element-file text sections:
    /// `TITLE`, `VERSION`, `HBOND_RADIUS_INCREMENT`, `IMPLICIT_RADIUS_INCREMENT`,
    /// then a run of `ELEMENT atomicNo name minVal maxVal commonVal mass vdwRadius`
    /// records.
    pub fn from_text(text: &str) -> CoreResult<Self> {
        let mut catalog = ElementCatalog::new();
        for (lineno, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let keyword = match tokens.next() {
                Some(k) => k,
                None => continue,
            };
            match keyword {
                "TITLE" | "VERSION" => { /* free-form metadata, not retained */ }
                "HBOND_RADIUS_INCREMENT" => {
                    catalog.hbond_radius_increment = parse_field(
                        "element file",
                        "HBOND_RADIUS_INCREMENT",
                        lineno,
                        tokens.next(),
                    )?;
                }
                "IMPLICIT_RADIUS_INCREMENT" => {
                    catalog.implicit_radius_increment = parse_field(
                        "element file",
                        "IMPLICIT_RADIUS_INCREMENT",
                        lineno,
                        tokens.next(),
                    )?;
                }
                "ELEMENT" => {
                    let fields: Vec<&str> = tokens.collect();
                    if fields.len() < 7 {
                        return Err(CoreError::ParseFailure(ParseError::BadField {
                            context: "element file".into(),
                            field: "ELEMENT record".into(),
                            line: lineno,
                            detail: format!("expected 7 fields, found {}", fields.len()),
                        }));
                    }
                    let record = ElementRecord {
                        atomic_no: parse_tok("element file", "atomicNo", lineno, fields[0])?,
                        name: fields[1].to_string(),
                        min_valence: parse_tok("element file", "minVal", lineno, fields[2])?,
                        max_valence: parse_tok("element file", "maxVal", lineno, fields[3])?,
                        common_valence: parse_tok("element file", "commonVal", lineno, fields[4])?,
                        mass: parse_tok("element file", "mass", lineno, fields[5])?,
                        vdw_radius: parse_tok("element file", "vdwRadius", lineno, fields[6])?,
                    };
                    catalog.insert(record);
                }
                other => {
                    log::warn!("element file: unrecognized section/keyword '{other}' on line {lineno}, ignoring");
                }
            }
        }
        Ok(catalog)
    }
}

fn parse_field<T: std::str::FromStr>(
    context: &str,
    field: &str,
    line: usize,
    token: Option<&str>,
) -> CoreResult<T> {
    let token = token.ok_or_else(|| {
        CoreError::ParseFailure(ParseError::BadField {
            context: context.into(),
            field: field.into(),
            line,
            detail: "missing value".into(),
        })
    })?;
    parse_tok(context, field, line, token)
}

fn parse_tok<T: std::str::FromStr>(
    context: &str,
    field: &str,
    line: usize,
    token: &str,
) -> CoreResult<T> {
    token.parse::<T>().map_err(|_| {
        CoreError::ParseFailure(ParseError::BadField {
            context: context.into(),
            field: field.into(),
            line,
            detail: format!("could not parse '{token}'"),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
TITLE Sample elements
VERSION 1.0
HBOND_RADIUS_INCREMENT 0.0
IMPLICIT_RADIUS_INCREMENT 0.0
ELEMENT 6 C 1 4 4 12.011 1.70
ELEMENT 7 N 1 4 3 14.007 1.55
ELEMENT 8 O 1 2 2 15.999 1.52
";

    #[test]
    fn parses_records_and_looks_up_both_ways() {
        let catalog = ElementCatalog::from_text(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        let carbon = catalog.get(6).unwrap();
        assert_eq!(carbon.name, "C");
        assert!((carbon.vdw_radius - 1.70).abs() < 1e-9);
        let by_name = catalog.get_by_name("o").unwrap();
        assert_eq!(by_name.atomic_no, 8);
    }

    #[test]
    fn rejects_short_element_record() {
        let err = ElementCatalog::from_text("ELEMENT 6 C 1 4").unwrap_err();
        assert!(matches!(err, CoreError::ParseFailure(_)));
    }
}
