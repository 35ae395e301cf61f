//! `FlexData`: a parameter bag describing how flexible a `Model` is allowed
//! to be, keyed by a closed set of strings per flexibility class.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlexClass {
    Receptor,
    Ligand,
    Solvent,
}

impl FlexClass {
    /// The closed key set each flexibility class accepts.
    pub fn allowed_keys(self) -> &'static [&'static str] {
        match self {
            FlexClass::Receptor => &["TETHERED", "FLEXIBLE_SIDECHAINS", "MAX_TRANS", "MAX_ROT"],
            FlexClass::Ligand => &["DIHEDRAL_STEP", "MAX_TRANS", "MAX_ROT", "FLAT_PLANES"],
            FlexClass::Solvent => &["OCCUPANCY_THRESHOLD", "MAX_TRANS"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlexValue {
    Scalar(f64),
    Text(String),
    Vector(Vec<f64>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlexData {
    pub class: FlexClass,
    values: HashMap<String, FlexValue>,
}

impl FlexData {
    pub fn new(class: FlexClass) -> Self {
        FlexData {
            class,
            values: HashMap::new(),
        }
    }

    /// Inserts `key => value`, rejecting any key outside the class's closed
    /// set.
    pub fn set(&mut self, key: &str, value: FlexValue) -> CoreResult<()> {
        if !self.class.allowed_keys().contains(&key) {
            return Err(CoreError::InvalidRequest(format!(
                "key '{key}' is not valid for flex class {:?}",
                self.class
            )));
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&FlexValue> {
        self.values.get(key)
    }

    pub fn get_scalar(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(FlexValue::Scalar(v)) => Some(*v),
            _ => None,
        }
    }
}
