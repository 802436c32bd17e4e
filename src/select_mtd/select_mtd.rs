use itertools::Itertools;

use crate::error::PopErr;
use crate::select_mtd::error::DegenerateTrialErr;
use crate::select_mtd::pava::{interpolate_knots, pava};
use crate::select_mtd::types::{DoseEstimate, MtdSelection};
use crate::validation::checks::{check_counts, check_target};

/// Selects the MTD from per-dose patient and toxicity counts.
///
/// Only doses with at least one patient are considered. If none of them saw a
/// toxicity, the highest one is selected. Otherwise the observed rates are
/// smoothed with a patient-weighted isotonic fit, interpolated between knots,
/// and the dose whose estimate is closest to `target` is chosen. Ties go to
/// the highest dose.
pub fn select_mtd(target: f64, n_pts: &[usize], n_tox: &[usize]) -> Result<MtdSelection, PopErr> {
    //----------------------------------------
    // Check arguments
    check_target(target)?;
    check_counts(n_pts, n_tox)?;

    let treated = n_pts.iter().positions(|&n| n > 0).collect::<Vec<usize>>();
    let Some(&highest_treated) = treated.last() else {
        return Err(DegenerateTrialErr::NoPatientsTreated.into());
    };

    //----------------------------------------
    // No toxicities anywhere: go as high as was explored
    if treated.iter().all(|&d| n_tox[d] == 0) {
        return Ok(MtdSelection {
            target,
            mtd: highest_treated + 1,
            estimates: treated
                .iter()
                .map(|&d| DoseEstimate {
                    dose: d + 1,
                    p_hat: 0.0,
                })
                .collect(),
        });
    }

    //----------------------------------------
    // Isotonic estimates
    let rates: Vec<f64> = treated
        .iter()
        .map(|&d| n_tox[d] as f64 / n_pts[d] as f64)
        .collect();
    let weights: Vec<f64> = treated.iter().map(|&d| n_pts[d] as f64).collect();
    let p_hat = interpolate_knots(&pava(&rates, &weights));

    let distances: Vec<f64> = p_hat.iter().map(|p| (p - target).abs()).collect();
    let min_distance = distances.iter().copied().fold(f64::INFINITY, f64::min);
    // Highest index among exact ties
    let selected = distances
        .iter()
        .rposition(|&dist| dist == min_distance)
        .unwrap_or(distances.len() - 1);

    Ok(MtdSelection {
        target,
        mtd: treated[selected] + 1,
        estimates: treated
            .iter()
            .zip(p_hat.iter())
            .map(|(&d, &p)| DoseEstimate {
                dose: d + 1,
                p_hat: p,
            })
            .collect(),
    })
}
