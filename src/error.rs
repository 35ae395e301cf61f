//! Error taxonomy for the core. One root [`CoreError`] wraps a
//! variant per error *kind*; `ObjectLifetime` has no runtime representation
//! because it's prevented by construction rather than caught: owning
//! containers live in `Model`, never raw borrowed pointers that can dangle.

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed input record (MOL2/SD/PSF/CRD/PDB/element/parameter file).
    #[error("parse failure: {0}")]
    ParseFailure(#[from] ParseError),

    /// Required key absent in a parameter section.
    #[error("missing parameter: {0}")]
    MissingParameter(#[from] MissingParameterError),

    /// Query against a nonexistent snapshot or saved coordinate.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Out-of-range query, e.g. `max_dist > docking site border`.
    #[error("bad argument: {0}")]
    BadArgument(String),

    /// Detected inconsistency during model setup.
    #[error("model topology error: {0}")]
    ModelTopology(#[from] ModelTopologyError),

    /// Underlying I/O failure while reading a file-format source.
    #[error("file read error: {0}")]
    FileRead(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{context}: missing required record '{record}'")]
    MissingRecord { context: String, record: String },

    #[error("{context}: bad version string '{found}', expected '{expected}'")]
    BadVersion {
        context: String,
        found: String,
        expected: String,
    },

    #[error("{context}: corrupt atom/bond counts on line {line}")]
    CorruptCounts { context: String, line: usize },

    #[error("{context}: could not parse field '{field}' on line {line}: {detail}")]
    BadField {
        context: String,
        field: String,
        line: usize,
        detail: String,
    },
}

#[derive(Debug, Error)]
#[error("section '{section}' has no key '{key}'")]
pub struct MissingParameterError {
    pub section: String,
    pub key: String,
}

#[derive(Debug, Error)]
pub enum ModelTopologyError {
    #[error("atom {atom_id} has coordination number {found} but bond map + implicit H imply {expected}")]
    CoordinationMismatch {
        atom_id: u32,
        found: usize,
        expected: usize,
    },

    #[error("input coordinates are not 3-D (z is uniformly zero); scoring would be poisoned")]
    NonThreeDimensional,

    #[error("atom {atom_id} carries {formal_bonds} formal bonds, exceeding its valence limit")]
    TooManyFormalBonds { atom_id: u32, formal_bonds: u32 },

    #[error("bond {bond_id} does not reference two atoms belonging to the same model")]
    CrossModelBond { bond_id: u32 },
}
