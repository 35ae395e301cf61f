//! Parameter-file catalog: `SECTION name` ...
//! `END_SECTION` blocks of `key value` lines, keyed internally as
//! `section::key` the way the original file format implies.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult, MissingParameterError, ParseError};

const HEADER_TOKEN: &str = "RBT_PARAMETER_FILE_V1.00";

/// Read-once immutable key→value store, shared by every scoring-function
/// setup stage in a run.
#[derive(Debug, Clone, Default)]
pub struct ParamCatalog {
    values: HashMap<String, String>,
    pub title: Option<String>,
    pub version: Option<String>,
}

impl ParamCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn qualified(section: &str, key: &str) -> String {
        format!("{section}::{key}")
    }

    pub fn insert(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.values.insert(Self::qualified(section, key), value.into());
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.values.get(&Self::qualified(section, key)).map(|s| s.as_str())
    }

    /// As `get`, but turns a missing key into `CoreError::MissingParameter`.
    pub fn require(&self, section: &str, key: &str) -> CoreResult<&str> {
        self.get(section, key).ok_or_else(|| {
            CoreError::MissingParameter(MissingParameterError {
                section: section.to_string(),
                key: key.to_string(),
            })
        })
    }

    pub fn require_f64(&self, section: &str, key: &str) -> CoreResult<f64> {
        let raw = self.require(section, key)?;
        raw.parse::<f64>().map_err(|_| {
            CoreError::ParseFailure(ParseError::BadField {
                context: format!("parameter section '{section}'"),
                field: key.to_string(),
                line: 0,
                detail: format!("could not parse '{raw}' as f64"),
            })
        })
    }

    pub fn get_f64_or(&self, section: &str, key: &str, default: f64) -> f64 {
        self.get(section, key)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(default)
    }

    /// Parse the `RBT_PARAMETER_FILE_V1.00` header, `TITLE`/`VERSION` lines
    /// and `SECTION name` ... `END_SECTION` blocks.
    pub fn from_text(text: &str) -> CoreResult<Self> {
        let mut lines = text.lines().enumerate();
        let (header_line, header) = lines
            .next()
            .map(|(n, l)| (n, l.trim()))
            .ok_or_else(|| missing("parameter file", "header", 0))?;
        if header != HEADER_TOKEN {
            return Err(CoreError::ParseFailure(ParseError::BadVersion {
                context: "parameter file".into(),
                found: header.to_string(),
                expected: HEADER_TOKEN.into(),
            }));
        }
        let _ = header_line;

        let mut catalog = ParamCatalog::new();
        let mut current_section: Option<String> = None;

        for (lineno, raw_line) in lines {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let mut tokens = line.splitn(2, char::is_whitespace);
            let keyword = tokens.next().unwrap_or("");
            let rest = tokens.next().unwrap_or("").trim();

            match keyword {
                "TITLE" => catalog.title = Some(rest.to_string()),
                "VERSION" => catalog.version = Some(rest.to_string()),
                "SECTION" => {
                    if current_section.is_some() {
                        return Err(CoreError::ParseFailure(ParseError::MissingRecord {
                            context: "parameter file".into(),
                            record: "END_SECTION (nested SECTION)".into(),
                        }));
                    }
                    current_section = Some(rest.to_string());
                }
                "END_SECTION" => {
                    if current_section.take().is_none() {
                        return Err(CoreError::ParseFailure(ParseError::MissingRecord {
                            context: "parameter file".into(),
                            record: "SECTION (unmatched END_SECTION)".into(),
                        }));
                    }
                }
                key => {
                    let section = current_section.as_ref().ok_or_else(|| {
                        CoreError::ParseFailure(ParseError::BadField {
                            context: "parameter file".into(),
                            field: key.to_string(),
                            line: lineno,
                            detail: "key/value line outside any SECTION block".into(),
                        })
                    })?;
                    catalog.insert(section, key, rest);
                }
            }
        }

        if current_section.is_some() {
            return Err(CoreError::ParseFailure(ParseError::MissingRecord {
                context: "parameter file".into(),
                record: "END_SECTION".into(),
            }));
        }

        Ok(catalog)
    }
}

fn missing(context: &str, record: &str, _line: usize) -> CoreError {
    CoreError::ParseFailure(ParseError::MissingRecord {
        context: context.to_string(),
        record: record.to_string(),
    })
}
