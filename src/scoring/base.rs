//! Shared scoring-function trait and per-pair annotation channel.

use crate::error::CoreResult;
use crate::model::{AtomId, Model};

/// One contributing atom-pair term, recorded only when annotation mode is
/// enabled. Never affects the returned score.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub atom1: AtomId,
    pub atom2: AtomId,
    pub distance: f64,
    pub energy: f64,
}

/// Common shape for a scoring function term: score a receptor
/// model against a ligand model, optionally collecting per-pair
/// annotations.
pub trait BaseSf {
    /// Total score for the receptor/ligand pair. Lower is better, matching
    /// every concrete term implementing this trait.
    fn score(&self, receptor: &Model, ligand: &Model) -> CoreResult<f64>;

    /// As `score`, but also returns the per-pair annotations that produced
    /// it.
    fn score_annotated(&self, receptor: &Model, ligand: &Model) -> CoreResult<(f64, Vec<Annotation>)>;
}
