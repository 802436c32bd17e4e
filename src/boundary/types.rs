//----------------------------------------
// boundary mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::error::PopErr;
use crate::validation::error::{ConfigurationErr, DomainErr};

/// Threshold on the Bayes factor, possibly depending on the cumulative
/// number of patients treated at a dose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cutoff {
    Constant(f64),
    /// Entry `i` is the cutoff at cumulative count `i + 1`
    Custom { by_count: Vec<f64> },
    #[serde(skip)]
    Function(fn(usize) -> f64),
}

impl Cutoff {
    /// Cutoff at cumulative count `n` (n >= 1). Custom cutoffs are assumed to
    /// have been checked with `validate`; past the end the last entry is used.
    pub fn at(&self, n: usize) -> f64 {
        match self {
            Cutoff::Constant(c) => *c,
            Cutoff::Custom { by_count } => by_count
                .get(n.saturating_sub(1))
                .or(by_count.last())
                .copied()
                .unwrap_or(f64::NAN),
            Cutoff::Function(f) => f(n),
        }
    }

    pub fn validate(&self, n_max: usize) -> Result<(), PopErr> {
        if let Cutoff::Custom { by_count } = self
            && by_count.len() < n_max
        {
            return Err(ConfigurationErr::CutoffTooShort {
                given: by_count.len(),
                needed: n_max,
            }
            .into());
        }
        for n in 1..=n_max {
            let value = self.at(n);
            if !(value > 0.0 && value.is_finite()) {
                return Err(DomainErr::BadCutoff { n, value }.into());
            }
        }
        Ok(())
    }
}

/// Decision thresholds for a given cumulative count `n` at the current dose.
/// Thresholds are toxicity counts; -inf / +inf mean the rule never fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryRow {
    pub n: usize,
    /// Escalate if # toxicities <= this
    pub escalate: f64,
    /// De-escalate if # toxicities >= this
    pub de_escalate: f64,
    /// Eliminate this dose and all lower doses if # toxicities <= this
    pub lower_exclusion: f64,
    /// Eliminate this dose and all higher doses if # toxicities >= this
    pub upper_exclusion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryTable {
    pub rows: Vec<BoundaryRow>,
}

impl BoundaryTable {
    pub fn row(&self, n: usize) -> Option<&BoundaryRow> {
        self.rows
            .binary_search_by_key(&n, |row| row.n)
            .ok()
            .map(|i| &self.rows[i])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Boundaries after every single patient (`full`, used with titration)
/// and at cohort completion only (`cohort`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopBoundary {
    pub target: f64,
    pub cohort_size: usize,
    pub full: BoundaryTable,
    pub cohort: BoundaryTable,
}
