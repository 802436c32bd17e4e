use itertools::Itertools;
use rand::{SeedableRng, rngs};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::boundary::get_boundary::get_boundary;
use crate::error::PopErr;
use crate::oc::types::{OcTally, OperatingCharacteristics};
use crate::pop_settings::PopSettings;
use crate::simulation::{sim_trial::sim_trial, types::TrialDesign};

/// Simulates `settings.n_trial` PoP trials and summarizes them.
///
/// Replicate `i` draws from its own `StdRng` seeded with `seed + i`, so the
/// result does not depend on whether replicates run in parallel or in which
/// order they finish. Degenerate replicates are skipped and counted in
/// `n_skipped`; denominators stay at `n_trial`.
pub fn get_oc(settings: &PopSettings) -> Result<OperatingCharacteristics, PopErr> {
    //----------------------------------------
    // Check arguments + build boundary
    settings.validate()?;
    let boundary = get_boundary(
        settings.target,
        settings.n_cohort,
        settings.cohort_size,
        &settings.cutoff,
        &settings.cutoff_e,
        settings.bf_multiplier,
    )?;

    let design = TrialDesign::from(settings);
    let n_doses = settings.n_doses();
    let true_mtd = true_mtd(&settings.skeleton, settings.target);
    let risk_threshold = settings.risk_cutoff * settings.sample_size() as f64;

    info!(
        n_trial = settings.n_trial,
        n_doses,
        sample_size = settings.sample_size(),
        titration = settings.titration,
        early_terminate = settings.early_terminate,
        "simulating PoP trials"
    );

    //----------------------------------------
    // Simulate replicates
    let run_replicate = |i: usize| -> Result<OcTally, PopErr> {
        let mut rng = rngs::StdRng::seed_from_u64(settings.seed.wrapping_add(i as u64));
        match sim_trial(&design, &boundary, &mut rng) {
            Ok(outcome) => Ok(OcTally::from_outcome(&outcome, true_mtd, risk_threshold)),
            Err(PopErr::DegenerateTrial(e)) => {
                warn!(replicate = i, "skipping replicate: {e}");
                Ok(OcTally::skipped(n_doses))
            }
            Err(e) => Err(e),
        }
    };

    let tally = if settings.parallel {
        (0..settings.n_trial)
            .into_par_iter()
            .map(run_replicate)
            .try_reduce(|| OcTally::empty(n_doses), |a, b| Ok(a.merge(b)))?
    } else {
        (0..settings.n_trial)
            .map(run_replicate)
            .try_fold(OcTally::empty(n_doses), |acc, tally| {
                tally.map(|tally| acc.merge(tally))
            })?
    };

    let oc = tally.finish(true_mtd, settings.n_trial);
    info!(
        early_stop_rate = oc.early_stop_rate,
        mean_total_pts = oc.mean_total_pts,
        n_skipped = oc.n_skipped,
        "finished PoP simulation"
    );
    Ok(oc)
}

/// First dose (0-based) whose true toxicity is closest to target
pub fn true_mtd(skeleton: &[f64], target: f64) -> usize {
    skeleton
        .iter()
        .map(|p| (p - target).abs())
        .position_min_by(|a, b| a.total_cmp(b))
        .unwrap_or(0)
}
