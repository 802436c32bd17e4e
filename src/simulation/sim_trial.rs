use rand::Rng;
use rand::distributions::Distribution;
use statrs::distribution::Binomial;
use tracing::trace;

use crate::boundary::types::{BoundaryTable, PopBoundary};
use crate::error::PopErr;
use crate::select_mtd::select_mtd::select_mtd;
use crate::simulation::types::{
    Decision, DoseStatus, EliminationReason, TrialDesign, TrialOutcome, TrialPhase, TrialState,
};
use crate::validation::checks::{check_design_size, check_skeleton, check_start_dose, check_target};
use crate::validation::error::{ConfigurationErr, DomainErr};

/// Simulates one PoP trial against the true toxicity `design.skeleton`.
///
/// Random draws are consumed in a fixed order: one Binomial(1, p) draw per
/// titration patient, then one Binomial(size, p) draw per cohort. The same
/// rng state therefore always reproduces the same trial.
///
/// A trial that stops early carries its MTD (or none) from the exclusion
/// rule. Otherwise the MTD comes from isotonic selection on the final counts,
/// and a selection failure is returned as `PopErr::DegenerateTrial` for the
/// caller to tally.
///
/// The design is checked before any draw, and `boundary` must have been
/// built for the design's cohort size and sample size.
pub fn sim_trial<R: Rng + ?Sized>(
    design: &TrialDesign,
    boundary: &PopBoundary,
    rng: &mut R,
) -> Result<TrialOutcome, PopErr> {
    //----------------------------------------
    // Check arguments
    check_target(design.target)?;
    check_skeleton(&design.skeleton)?;
    check_design_size(design.n_cohort, design.cohort_size)?;
    check_start_dose(design.start_dose + 1, design.n_doses())?;
    if boundary.cohort_size != design.cohort_size || boundary.full.len() < design.sample_size() {
        return Err(ConfigurationErr::BoundaryMismatch {
            boundary_cohort_size: boundary.cohort_size,
            boundary_max: boundary.full.len(),
            cohort_size: design.cohort_size,
            sample_size: design.sample_size(),
        }
        .into());
    }

    // Titration always hands over to cohorts with exclusion on
    let exclusion = design.early_terminate || design.titration;
    let mut state = TrialState::new(design);

    //----------------------------------------
    // Titration: one patient at a time, up one dose per non-toxic patient
    while state.phase == TrialPhase::Titration && state.remaining > 0 {
        let d = state.dose;
        let n_tox = draw_toxicities(rng, design.skeleton[d], 1, d)?;
        treat(&mut state, 1, n_tox);
        if n_tox > 0 {
            state.phase = TrialPhase::Cohort;
            update_dose(&mut state, &boundary.full, exclusion);
        } else if d + 1 < design.n_doses() {
            state.dose += 1;
        } else {
            state.phase = TrialPhase::Cohort;
        }
    }

    //----------------------------------------
    // Cohorts
    // Counts are only multiples of the cohort size without titration
    let table = if design.titration {
        &boundary.full
    } else {
        &boundary.cohort
    };
    while state.phase == TrialPhase::Cohort && state.remaining > 0 {
        let d = state.dose;
        let size = design.cohort_size.min(state.remaining);
        let n_tox = draw_toxicities(rng, design.skeleton[d], size, d)?;
        treat(&mut state, size, n_tox);
        update_dose(&mut state, table, exclusion);
    }
    if state.is_running() {
        state.phase = TrialPhase::Completed;
    }

    //----------------------------------------
    // Select MTD
    match state.phase {
        TrialPhase::TerminatedEarly { mtd } => Ok(TrialOutcome {
            n_pts: state.n_pts,
            n_tox: state.n_tox,
            mtd: mtd.map(|d| d + 1),
            stopped_early: true,
        }),
        _ => {
            let selection = select_mtd(design.target, &state.n_pts, &state.n_tox)?;
            Ok(TrialOutcome {
                n_pts: state.n_pts,
                n_tox: state.n_tox,
                mtd: Some(selection.mtd),
                stopped_early: false,
            })
        }
    }
}

fn draw_toxicities<R: Rng + ?Sized>(
    rng: &mut R,
    p: f64,
    n: usize,
    dose: usize,
) -> Result<usize, PopErr> {
    let binomial = match Binomial::new(p, n as u64) {
        Ok(binomial) => binomial,
        Err(_) => {
            return Err(DomainErr::BadProbability {
                dose: dose + 1,
                value: p,
            }
            .into());
        }
    };
    let n_tox: f64 = binomial.sample(rng);
    Ok(n_tox as usize)
}

fn treat(state: &mut TrialState, n: usize, n_tox: usize) {
    state.n_pts[state.dose] += n;
    state.n_tox[state.dose] += n_tox;
    state.remaining -= n;
}

fn eliminate(state: &mut TrialState, doses: impl Iterator<Item = usize>, reason: EliminationReason) {
    for d in doses {
        if state.status[d] == DoseStatus::Available {
            state.status[d] = DoseStatus::Eliminated(reason);
        }
    }
}

/// Applies the exclusion rule (if enabled) and then the escalation rule at
/// the current dose, using the row for that dose's cumulative count.
pub(crate) fn update_dose(state: &mut TrialState, table: &BoundaryTable, early_terminate: bool) {
    let d = state.dose;
    let k = state.status.len();
    let Some(row) = table.row(state.n_pts[d]) else {
        return;
    };
    let y = state.n_tox[d] as f64;

    //----------------------------------------
    // Exclusion
    if early_terminate {
        if y >= row.upper_exclusion {
            eliminate(state, d..k, EliminationReason::TooToxic);
        }
        if y <= row.lower_exclusion {
            eliminate(state, 0..=d, EliminationReason::TooSafe);
        }
        if state.status.iter().all(|s| *s != DoseStatus::Available) {
            // Lowest dose too toxic: no dose can be recommended
            let mtd = match state.status[0] {
                DoseStatus::Eliminated(EliminationReason::TooToxic) => None,
                _ => Some(d),
            };
            trace!(dose = d + 1, ?mtd, "all doses eliminated");
            state.phase = TrialPhase::TerminatedEarly { mtd };
            return;
        }
    }

    //----------------------------------------
    // Escalation
    let decision = match state.status[d] {
        DoseStatus::Eliminated(EliminationReason::TooToxic) => Decision::DeEscalate,
        DoseStatus::Eliminated(EliminationReason::TooSafe) => Decision::Escalate,
        DoseStatus::Available if y <= row.escalate => Decision::Escalate,
        DoseStatus::Available if y >= row.de_escalate => Decision::DeEscalate,
        DoseStatus::Available => Decision::Stay,
    };
    match decision {
        Decision::Escalate if d + 1 < k && state.is_available(d + 1) => state.dose = d + 1,
        Decision::DeEscalate if d > 0 && state.is_available(d - 1) => state.dose = d - 1,
        _ => {}
    }
}
