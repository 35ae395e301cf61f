//! CSV sink: writes one row per scored pose. Kept hand-rolled rather than
//! pulled in from a CSV crate — the schema is a fixed, small set of
//! numeric columns, so plain `write!` calls are simpler than a structured
//! writer.

use std::io::Write;

use crate::error::CoreResult;

#[derive(Debug, Clone)]
pub struct ScoreRow {
    pub pose_id: u64,
    pub total_score: f64,
    pub vdw_score: f64,
    pub dihedral_score: f64,
    pub hhs_score: f64,
}

pub fn write_csv<W: Write>(mut out: W, rows: &[ScoreRow]) -> CoreResult<()> {
    writeln!(out, "pose_id,total_score,vdw_score,dihedral_score,hhs_score")?;
    for row in rows {
        writeln!(
            out,
            "{},{},{},{},{}",
            row.pose_id, row.total_score, row.vdw_score, row.dihedral_score, row.hhs_score
        )?;
    }
    Ok(())
}
