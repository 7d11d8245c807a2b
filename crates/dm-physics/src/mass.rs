//! Invariant mass of the two-particle system and residuals against the
//! reference column.

use dm_ingest::coerce::NumericTable;
use thiserror::Error;

use crate::stats;

#[derive(Debug, Error)]
pub enum PhysicsError {
    /// The coercer guarantees the required columns; hitting this means the
    /// table was built some other way.
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("cannot reconstruct from an empty table")]
    EmptyTable,
}

/// Per-row reconstruction output plus aggregate statistics.
#[derive(Debug, Clone)]
pub struct MassResult {
    /// Computed invariant mass per row.
    pub mass: Vec<f64>,
    /// Signed difference per row: computed minus reference.
    pub residual: Vec<f64>,
    pub stats: MassStats,
}

#[derive(Debug, Clone, Copy)]
pub struct MassStats {
    pub events: usize,
    pub residual_mean: f64,
    /// Population standard deviation of the residuals (divide by N).
    pub residual_rms: f64,
    pub min_mass_calc: f64,
    pub max_mass_calc: f64,
}

/// Invariant mass from the summed four-vector of the system.
///
/// Floating-point cancellation can push `m²` slightly negative for massless
/// or near-threshold combinations; the clamp to zero before the square root
/// keeps those rows at mass 0 instead of NaN.
pub fn invariant_mass(e_sum: f64, px_sum: f64, py_sum: f64, pz_sum: f64) -> f64 {
    let m2 = e_sum * e_sum - px_sum * px_sum - py_sum * py_sum - pz_sum * pz_sum;
    m2.max(0.0).sqrt()
}

/// Reconstruct the invariant mass per row and the residual against the
/// table's own `M` column, with aggregate statistics over all rows.
///
/// Pure: the caller persists the result.
pub fn reconstruct(table: &NumericTable) -> Result<MassResult, PhysicsError> {
    let col = |name: &'static str| table.column(name).ok_or(PhysicsError::MissingColumn(name));

    let e1 = col("E1")?;
    let px1 = col("px1")?;
    let py1 = col("py1")?;
    let pz1 = col("pz1")?;
    let e2 = col("E2")?;
    let px2 = col("px2")?;
    let py2 = col("py2")?;
    let pz2 = col("pz2")?;
    let m_ref = col("M")?;

    let n = e1.len();
    if n == 0 {
        return Err(PhysicsError::EmptyTable);
    }

    let mut mass = Vec::with_capacity(n);
    for i in 0..n {
        mass.push(invariant_mass(
            e1[i] + e2[i],
            px1[i] + px2[i],
            py1[i] + py2[i],
            pz1[i] + pz2[i],
        ));
    }

    let residual: Vec<f64> = mass.iter().zip(m_ref).map(|(m, r)| m - r).collect();

    let stats = MassStats {
        events: n,
        residual_mean: stats::mean(&residual),
        residual_rms: stats::population_std(&residual),
        min_mass_calc: stats::min(&mass),
        max_mass_calc: stats::max(&mass),
    };

    Ok(MassResult { mass, residual, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dm_ingest::coerce::coerce;
    use dm_ingest::table::Table;
    use dm_ingest::REQUIRED_COLUMNS;

    /// Build a coerced table from rows of nine f64 values.
    fn numeric_table(rows: &[[f64; 9]]) -> NumericTable {
        let names: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        let columns: Vec<Vec<String>> = (0..9)
            .map(|c| rows.iter().map(|r| format!("{}", r[c])).collect())
            .collect();
        let (numeric, _) = coerce(&Table::new(names, columns)).unwrap();
        numeric
    }

    #[test]
    fn timelike_system_matches_closed_form() {
        // E_sum=10, p_sum=(2,0,6): m = sqrt(100 - 4 - 36) = sqrt(60)
        let rows = [[6.0, 1.0, 0.0, 3.0, 4.0, 1.0, 0.0, 3.0, 60f64.sqrt()]];
        let result = reconstruct(&numeric_table(&rows)).unwrap();
        assert!((result.mass[0] - 60f64.sqrt()).abs() < 1e-12);
        assert!(result.residual[0].abs() < 1e-12);
    }

    #[test]
    fn negative_minkowski_norm_clamps_to_zero() {
        // E=2, |p|=20: far spacelike, must clamp rather than produce NaN.
        let rows = [[1.0, 10.0, 0.0, 0.0, 1.0, 10.0, 0.0, 0.0, 0.0]];
        let result = reconstruct(&numeric_table(&rows)).unwrap();
        assert_eq!(result.mass[0], 0.0);
        assert!(!result.mass[0].is_nan());
    }

    #[test]
    fn rms_zero_iff_reference_matches_exactly() {
        let m = 60f64.sqrt();
        let rows = [
            [6.0, 1.0, 0.0, 3.0, 4.0, 1.0, 0.0, 3.0, m],
            [6.0, 1.0, 0.0, 3.0, 4.0, 1.0, 0.0, 3.0, m],
        ];
        let result = reconstruct(&numeric_table(&rows)).unwrap();
        assert_eq!(result.stats.residual_rms, 0.0);
        assert_eq!(result.stats.residual_mean, 0.0);
    }

    #[test]
    fn rms_is_nonnegative_with_biased_reference() {
        let rows = [
            [6.0, 1.0, 0.0, 3.0, 4.0, 1.0, 0.0, 3.0, 7.0],
            [6.0, 1.0, 0.0, 3.0, 4.0, 1.0, 0.0, 3.0, 8.0],
        ];
        let result = reconstruct(&numeric_table(&rows)).unwrap();
        assert!(result.stats.residual_rms > 0.0);
        assert_eq!(result.stats.events, 2);
    }

    #[test]
    fn min_max_span_the_computed_masses() {
        let rows = [
            [1.0, 10.0, 0.0, 0.0, 1.0, 10.0, 0.0, 0.0, 0.0],
            [6.0, 1.0, 0.0, 3.0, 4.0, 1.0, 0.0, 3.0, 60f64.sqrt()],
        ];
        let result = reconstruct(&numeric_table(&rows)).unwrap();
        assert_eq!(result.stats.min_mass_calc, 0.0);
        assert!((result.stats.max_mass_calc - 60f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn population_rms_divides_by_n() {
        // Residuals -1 and +1: population std = 1, sample std would be sqrt(2).
        let m = 60f64.sqrt();
        let rows = [
            [6.0, 1.0, 0.0, 3.0, 4.0, 1.0, 0.0, 3.0, m + 1.0],
            [6.0, 1.0, 0.0, 3.0, 4.0, 1.0, 0.0, 3.0, m - 1.0],
        ];
        let result = reconstruct(&numeric_table(&rows)).unwrap();
        assert!((result.stats.residual_rms - 1.0).abs() < 1e-12);
    }
}
