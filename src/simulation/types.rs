//----------------------------------------
// simulation mod types
//----------------------------------------
use crate::pop_settings::PopSettings;

/// The parts of the settings a single simulated trial needs
#[derive(Debug, Clone)]
pub struct TrialDesign {
    pub target: f64,
    pub skeleton: Vec<f64>,
    pub n_cohort: usize,
    pub cohort_size: usize,
    /// 0-based
    pub start_dose: usize,
    pub titration: bool,
    /// Applies the exclusion rule after each cohort. Titration turns it on
    /// regardless of this flag.
    pub early_terminate: bool,
}

impl TrialDesign {
    pub fn n_doses(&self) -> usize {
        self.skeleton.len()
    }

    pub fn sample_size(&self) -> usize {
        self.n_cohort * self.cohort_size
    }
}

impl From<&PopSettings> for TrialDesign {
    fn from(settings: &PopSettings) -> Self {
        Self {
            target: settings.target,
            skeleton: settings.skeleton.clone(),
            n_cohort: settings.n_cohort,
            cohort_size: settings.cohort_size,
            start_dose: settings.start_dose.saturating_sub(1),
            titration: settings.titration,
            early_terminate: settings.early_terminate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EliminationReason {
    TooToxic,
    TooSafe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoseStatus {
    Available,
    Eliminated(EliminationReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialPhase {
    Titration,
    Cohort,
    /// `mtd` is 0-based; `None` when the lowest dose was found too toxic
    TerminatedEarly { mtd: Option<usize> },
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Escalate,
    Stay,
    DeEscalate,
}

/// Mutable record of one simulated trial
#[derive(Debug, Clone)]
pub struct TrialState {
    pub n_pts: Vec<usize>,
    pub n_tox: Vec<usize>,
    pub status: Vec<DoseStatus>,
    /// 0-based
    pub dose: usize,
    pub remaining: usize,
    pub phase: TrialPhase,
}

impl TrialState {
    pub fn new(design: &TrialDesign) -> Self {
        let k = design.n_doses();
        Self {
            n_pts: vec![0; k],
            n_tox: vec![0; k],
            status: vec![DoseStatus::Available; k],
            dose: design.start_dose,
            remaining: design.sample_size(),
            phase: if design.titration {
                TrialPhase::Titration
            } else {
                TrialPhase::Cohort
            },
        }
    }

    pub fn is_available(&self, dose: usize) -> bool {
        self.status.get(dose) == Some(&DoseStatus::Available)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, TrialPhase::Titration | TrialPhase::Cohort)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    pub n_pts: Vec<usize>,
    pub n_tox: Vec<usize>,
    /// 1-based; `None` if the trial stopped early without selecting a dose
    pub mtd: Option<usize>,
    pub stopped_early: bool,
}
