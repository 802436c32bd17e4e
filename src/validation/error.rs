//----------------------------------------
// validation errors
//----------------------------------------
use crate::error::PopErr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DomainErr {
    #[error("target toxicity rate should be in (0, 1); got {0}")]
    BadTarget(f64),
    #[error("toxicity probability should be in (0, 1); got {value} at dose {dose}")]
    BadProbability { dose: usize, value: f64 },
    #[error("skeleton should be non-decreasing; dose {dose} ({value}) is below dose {prev_dose}")]
    NonMonotoneSkeleton {
        dose: usize,
        prev_dose: usize,
        value: f64,
    },
    #[error("Bayes factor is undefined for zero patients")]
    ZeroPatients,
    #[error("toxicity count ({n_tox}) exceeds patient count ({n_pts})")]
    ToxicitiesExceedPatients { n_pts: usize, n_tox: usize },
    #[error(
        "lengths of patient and toxicity counts don't match (patients length {pts_length}, \
        toxicities length {tox_length})"
    )]
    MismatchedLengths {
        pts_length: usize,
        tox_length: usize,
    },
    #[error("Bayes factor multiplier should be positive and finite; got {0}")]
    BadMultiplier(f64),
    #[error("cutoff should be positive and finite; got {value} at count {n}")]
    BadCutoff { n: usize, value: f64 },
}

impl Into<PopErr> for DomainErr {
    fn into(self) -> PopErr {
        PopErr::Domain(self)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigurationErr {
    #[error("cohort size should be at least 1; got {0}")]
    BadCohortSize(usize),
    #[error("number of cohorts should be at least 1; got {0}")]
    BadCohortCount(usize),
    #[error("skeleton should contain at least one dose")]
    NoDoses,
    #[error("start dose should be in [1, {n_doses}]; got {start_dose}")]
    StartDoseOutOfRange { start_dose: usize, n_doses: usize },
    #[error("number of simulated trials should be at least 1")]
    NoTrials,
    #[error("risk cutoff should be in (0, 1); got {0}")]
    BadRiskCutoff(f64),
    #[error("custom cutoff covers {given} counts but the design needs {needed}")]
    CutoffTooShort { given: usize, needed: usize },
    #[error("exclusion cutoff ({cutoff_e}) should be below the cutoff ({cutoff}) at count {n}")]
    ExclusionCutoffTooLarge { n: usize, cutoff: f64, cutoff_e: f64 },
    #[error(
        "boundary was built for cohorts of {boundary_cohort_size} up to {boundary_max} patients, \
        but the design uses cohorts of {cohort_size} and {sample_size} patients"
    )]
    BoundaryMismatch {
        boundary_cohort_size: usize,
        boundary_max: usize,
        cohort_size: usize,
        sample_size: usize,
    },
}

impl Into<PopErr> for ConfigurationErr {
    fn into(self) -> PopErr {
        PopErr::Configuration(self)
    }
}
