//----------------------------------------
// operating characteristics mod types
//----------------------------------------
use itertools::izip;
use serde::{Deserialize, Serialize};

use crate::simulation::types::TrialOutcome;

/// Operating characteristics over `n_trial` simulated trials. Every rate and
/// mean divides by `n_trial`, including when degenerate replicates were
/// skipped; `n_skipped` records how many were.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingCharacteristics {
    /// 1-based dose whose true toxicity is closest to target
    pub true_mtd: usize,
    /// Fraction of trials selecting each dose
    pub sel_percent: Vec<f64>,
    pub mean_n_pts: Vec<f64>,
    pub mean_n_tox: Vec<f64>,
    pub mean_total_pts: f64,
    pub mean_total_tox: f64,
    /// Fraction of trials stopped early with no dose selected
    pub early_stop_rate: f64,
    /// Fraction of trials treating more than `risk_cutoff` of the sample
    /// above the true MTD
    pub risk_over: f64,
    /// Same, below the true MTD
    pub risk_under: f64,
    pub n_trial: usize,
    pub n_skipped: usize,
}

/// Integer counts accumulated over replicates. Merging is associative and
/// commutative, so partial tallies can be combined in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcTally {
    pub n_selected: Vec<usize>,
    pub n_pts: Vec<usize>,
    pub n_tox: Vec<usize>,
    pub n_early_stop: usize,
    pub n_overdose: usize,
    pub n_underdose: usize,
    pub n_skipped: usize,
}

impl OcTally {
    pub fn empty(n_doses: usize) -> Self {
        Self {
            n_selected: vec![0; n_doses],
            n_pts: vec![0; n_doses],
            n_tox: vec![0; n_doses],
            n_early_stop: 0,
            n_overdose: 0,
            n_underdose: 0,
            n_skipped: 0,
        }
    }

    pub fn skipped(n_doses: usize) -> Self {
        Self {
            n_skipped: 1,
            ..Self::empty(n_doses)
        }
    }

    /// `true_mtd` is 0-based; `risk_threshold` is a patient count
    pub fn from_outcome(outcome: &TrialOutcome, true_mtd: usize, risk_threshold: f64) -> Self {
        let mut tally = Self::empty(outcome.n_pts.len());
        match outcome.mtd {
            Some(mtd) => tally.n_selected[mtd - 1] = 1,
            None => tally.n_early_stop = 1,
        }

        let n_above: usize = outcome.n_pts[true_mtd + 1..].iter().sum();
        let n_below: usize = outcome.n_pts[..true_mtd].iter().sum();
        tally.n_overdose = usize::from(n_above as f64 > risk_threshold);
        tally.n_underdose = usize::from(n_below as f64 > risk_threshold);

        tally.n_pts = outcome.n_pts.clone();
        tally.n_tox = outcome.n_tox.clone();
        tally
    }

    pub fn merge(mut self, other: Self) -> Self {
        for (a, b) in izip!(
            self.n_selected
                .iter_mut()
                .chain(self.n_pts.iter_mut())
                .chain(self.n_tox.iter_mut()),
            other
                .n_selected
                .iter()
                .chain(other.n_pts.iter())
                .chain(other.n_tox.iter())
        ) {
            *a += b;
        }
        self.n_early_stop += other.n_early_stop;
        self.n_overdose += other.n_overdose;
        self.n_underdose += other.n_underdose;
        self.n_skipped += other.n_skipped;
        self
    }

    pub fn finish(self, true_mtd: usize, n_trial: usize) -> OperatingCharacteristics {
        let n = n_trial as f64;
        let per_trial =
            |counts: &[usize]| -> Vec<f64> { counts.iter().map(|&c| c as f64 / n).collect() };
        OperatingCharacteristics {
            true_mtd: true_mtd + 1,
            sel_percent: per_trial(&self.n_selected),
            mean_n_pts: per_trial(&self.n_pts),
            mean_n_tox: per_trial(&self.n_tox),
            mean_total_pts: self.n_pts.iter().sum::<usize>() as f64 / n,
            mean_total_tox: self.n_tox.iter().sum::<usize>() as f64 / n,
            early_stop_rate: self.n_early_stop as f64 / n,
            risk_over: self.n_overdose as f64 / n,
            risk_under: self.n_underdose as f64 / n,
            n_trial,
            n_skipped: self.n_skipped,
        }
    }
}
