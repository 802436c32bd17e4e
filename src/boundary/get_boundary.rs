use tracing::debug;

use crate::bayes_factor::pr_bf::pr_bf_scaled;
use crate::boundary::types::{BoundaryRow, BoundaryTable, Cutoff, PopBoundary};
use crate::error::PopErr;
use crate::validation::checks::{check_design_size, check_multiplier, check_target};
use crate::validation::error::ConfigurationErr;

/// Computes PoP decision boundaries for every cumulative count up to
/// `n_cohort * cohort_size`.
///
/// At count n, the current dose is retained when PrBF > cutoff(n). Otherwise
/// the observed rate y / n decides the direction: at or below target
/// escalates, above target de-escalates. Exclusion uses the same scan with
/// PrBF < cutoff_e(n): too few toxicities eliminate the dose and everything
/// below, too many eliminate the dose and everything above.
pub fn get_boundary(
    target: f64,
    n_cohort: usize,
    cohort_size: usize,
    cutoff: &Cutoff,
    cutoff_e: &Cutoff,
    bf_multiplier: f64,
) -> Result<PopBoundary, PopErr> {
    //----------------------------------------
    // Check arguments
    check_target(target)?;
    check_design_size(n_cohort, cohort_size)?;
    check_multiplier(bf_multiplier)?;
    let n_max = n_cohort * cohort_size;
    cutoff.validate(n_max)?;
    cutoff_e.validate(n_max)?;
    if let Some(n) = (1..=n_max).find(|&n| cutoff_e.at(n) >= cutoff.at(n)) {
        return Err(ConfigurationErr::ExclusionCutoffTooLarge {
            n,
            cutoff: cutoff.at(n),
            cutoff_e: cutoff_e.at(n),
        }
        .into());
    }

    //----------------------------------------
    // Scan every possible toxicity count
    let mut rows = (1..=n_max)
        .map(|n| scan_count(n, target, cutoff.at(n), cutoff_e.at(n), bf_multiplier))
        .collect::<Result<Vec<BoundaryRow>, PopErr>>()?;

    enforce_monotone(&mut rows);

    let cohort_rows = rows
        .iter()
        .filter(|row| row.n % cohort_size == 0)
        .copied()
        .collect();

    debug!(target, n_max, cohort_size, "built PoP boundary");

    Ok(PopBoundary {
        target,
        cohort_size,
        full: BoundaryTable { rows },
        cohort: BoundaryTable { rows: cohort_rows },
    })
}

fn scan_count(
    n: usize,
    target: f64,
    cutoff: f64,
    cutoff_e: f64,
    bf_multiplier: f64,
) -> Result<BoundaryRow, PopErr> {
    let mut row = BoundaryRow {
        n,
        escalate: f64::NEG_INFINITY,
        de_escalate: f64::INFINITY,
        lower_exclusion: f64::NEG_INFINITY,
        upper_exclusion: f64::INFINITY,
    };

    for y in 0..=n {
        let bf = pr_bf_scaled(n, y, target, bf_multiplier)?;
        let p_hat = y as f64 / n as f64;
        let retain = bf > cutoff;
        let exclude = bf < cutoff_e;

        if p_hat <= target {
            // Largest qualifying count on the low side
            if !retain {
                row.escalate = y as f64;
            }
            if exclude && p_hat < target {
                row.lower_exclusion = y as f64;
            }
        } else {
            // Smallest qualifying count on the high side
            if !retain && row.de_escalate.is_infinite() {
                row.de_escalate = y as f64;
            }
            if exclude && row.upper_exclusion.is_infinite() {
                row.upper_exclusion = y as f64;
            }
        }
    }

    Ok(row)
}

// Escalation boundary becomes its running maximum; a finite de-escalation
// boundary is never allowed to drop below an earlier finite one. A +inf
// de-escalation entry is left alone and does not reset the running maximum.
fn enforce_monotone(rows: &mut [BoundaryRow]) {
    let mut max_escalate = f64::NEG_INFINITY;
    let mut max_de_escalate = f64::NEG_INFINITY;
    for row in rows.iter_mut() {
        max_escalate = max_escalate.max(row.escalate);
        row.escalate = max_escalate;
        if row.de_escalate.is_finite() {
            max_de_escalate = max_de_escalate.max(row.de_escalate);
            row.de_escalate = max_de_escalate;
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::bayes_factor::pr_bf::DEFAULT_BF_MULTIPLIER;

    fn default_boundary() -> PopBoundary {
        get_boundary(
            0.3,                         // target
            10,                          // n_cohort
            3,                           // cohort_size
            &Cutoff::Constant(2.5),      // cutoff
            &Cutoff::Constant(5. / 24.), // cutoff_e
            DEFAULT_BF_MULTIPLIER,       // multiplier
        )
        .expect("failed to compute boundary")
    }

    #[test]
    fn table_sizes() {
        let boundary = default_boundary();
        assert_eq!(boundary.full.len(), 30);
        assert_eq!(boundary.cohort.len(), 10);
        assert!(boundary.cohort.rows.iter().all(|row| row.n % 3 == 0));
        assert_eq!(boundary.cohort.row(9), boundary.full.row(9));
    }

    #[test]
    fn escalate_below_de_escalate() {
        let boundary = default_boundary();
        for row in boundary.full.rows.iter() {
            assert!(row.escalate < row.de_escalate, "n = {}", row.n);
            assert!(row.lower_exclusion <= row.escalate, "n = {}", row.n);
            assert!(row.upper_exclusion >= row.de_escalate, "n = {}", row.n);
        }
    }

    #[test]
    fn boundaries_monotone_in_count() {
        let boundary = default_boundary();
        for pair in boundary.full.rows.windows(2) {
            assert!(pair[1].escalate >= pair[0].escalate);
            // +inf means "never de-escalate" at that count and is exempt; the
            // ordering only holds between finite thresholds
            if pair[0].de_escalate.is_finite() && pair[1].de_escalate.is_finite() {
                assert!(pair[1].de_escalate >= pair[0].de_escalate);
            }
        }
    }

    #[test]
    fn three_patient_cohort() {
        // 0/3 escalates, 1/3 stays, 2/3 de-escalates, 3/3 excludes
        let boundary = default_boundary();
        let row = boundary.cohort.row(3).expect("missing row for n = 3");
        assert_eq!(row.escalate, 0.0);
        assert_eq!(row.de_escalate, 2.0);
        assert_eq!(row.upper_exclusion, 3.0);
        assert_eq!(row.lower_exclusion, f64::NEG_INFINITY);
    }

    #[test]
    fn single_patient_row() {
        // 0/1 has PrBF = 1.05e > 2.5, so nothing fires below target
        let boundary = default_boundary();
        let row = boundary.full.row(1).expect("missing row for n = 1");
        assert_eq!(row.escalate, f64::NEG_INFINITY);
        assert_eq!(row.de_escalate, 1.0);
        assert_eq!(row.upper_exclusion, f64::INFINITY);
    }

    #[test]
    fn exclusion_cutoff_must_be_smaller() {
        let res = get_boundary(
            0.3,
            10,
            3,
            &Cutoff::Constant(1.0),
            &Cutoff::Constant(2.0),
            DEFAULT_BF_MULTIPLIER,
        );
        assert!(matches!(
            res,
            Err(PopErr::Configuration(
                ConfigurationErr::ExclusionCutoffTooLarge { n: 1, .. }
            ))
        ));
    }

    #[test]
    fn bad_design_fails_fast() {
        assert!(
            get_boundary(
                0.3,
                10,
                0,
                &Cutoff::Constant(2.5),
                &Cutoff::Constant(0.2),
                DEFAULT_BF_MULTIPLIER
            )
            .is_err()
        );
        assert!(
            get_boundary(
                1.3,
                10,
                3,
                &Cutoff::Constant(2.5),
                &Cutoff::Constant(0.2),
                DEFAULT_BF_MULTIPLIER
            )
            .is_err()
        );
    }
}
