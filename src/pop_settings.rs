use serde::{Deserialize, Serialize};

use crate::bayes_factor::pr_bf::DEFAULT_BF_MULTIPLIER;
use crate::boundary::types::Cutoff;
use crate::error::PopErr;
use crate::validation::checks::{
    check_design_size, check_multiplier, check_skeleton, check_start_dose, check_target,
};
use crate::validation::error::ConfigurationErr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopSettings {
    pub target: f64,
    pub n_cohort: usize,
    pub cohort_size: usize,
    pub titration: bool,
    pub cutoff: Cutoff,
    pub cutoff_e: Cutoff,
    pub bf_multiplier: f64,
    pub skeleton: Vec<f64>,
    pub n_trial: usize,
    pub risk_cutoff: f64,
    /// Ignored when `titration` is set; titration always excludes doses
    pub early_terminate: bool,
    /// 1-based
    pub start_dose: usize,
    pub seed: u64,
    pub parallel: bool,
}

impl Default for PopSettings {
    fn default() -> Self {
        Self {
            target: 0.3,
            n_cohort: 10,
            cohort_size: 3,
            titration: false,
            cutoff: Cutoff::Constant(2.5),
            cutoff_e: Cutoff::Constant(5.0 / 24.0),
            bf_multiplier: DEFAULT_BF_MULTIPLIER,
            skeleton: vec![0.05, 0.10, 0.20, 0.30, 0.50],
            n_trial: 10000,
            risk_cutoff: 0.8,
            early_terminate: true,
            start_dose: 1,
            seed: 123,
            parallel: true,
        }
    }
}

impl PopSettings {
    pub fn n_doses(&self) -> usize {
        self.skeleton.len()
    }

    pub fn sample_size(&self) -> usize {
        self.n_cohort * self.cohort_size
    }

    /// Checks every setting up front. Cutoff checks happen when the boundary
    /// is built, which is always the first step of a run.
    pub fn validate(&self) -> Result<(), PopErr> {
        check_target(self.target)?;
        check_design_size(self.n_cohort, self.cohort_size)?;
        check_skeleton(&self.skeleton)?;
        check_start_dose(self.start_dose, self.n_doses())?;
        check_multiplier(self.bf_multiplier)?;
        if self.n_trial < 1 {
            return Err(ConfigurationErr::NoTrials.into());
        }
        if !(self.risk_cutoff > 0.0 && self.risk_cutoff < 1.0) {
            return Err(ConfigurationErr::BadRiskCutoff(self.risk_cutoff).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::validation::error::DomainErr;

    #[test]
    fn defaults_are_valid() {
        let settings = PopSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.sample_size(), 30);
        assert_eq!(settings.n_doses(), 5);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let settings: PopSettings = serde_json::from_str(
            r#"{
                "target": 0.25,
                "skeleton": [0.1, 0.25, 0.4],
                "cutoff": { "custom": { "by_count": [2.0, 2.0, 2.5] } },
                "titration": true
            }"#,
        )
        .expect("failed to parse settings");

        assert_eq!(settings.target, 0.25);
        assert_eq!(settings.skeleton, vec![0.1, 0.25, 0.4]);
        assert!(settings.titration);
        assert_eq!(
            settings.cutoff,
            Cutoff::Custom {
                by_count: vec![2.0, 2.0, 2.5]
            }
        );
        assert_eq!(settings.cohort_size, 3);
        assert_eq!(settings.seed, 123);
    }

    #[test]
    fn json_round_trip() {
        let settings = PopSettings::default();
        let json = serde_json::to_string(&settings).expect("failed to serialize settings");
        let parsed: PopSettings = serde_json::from_str(&json).expect("failed to parse settings");
        assert_eq!(parsed, settings);
    }

    #[test]
    fn invalid_settings() {
        let settings = PopSettings {
            start_dose: 6,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(PopErr::Configuration(ConfigurationErr::StartDoseOutOfRange {
                start_dose: 6,
                n_doses: 5
            }))
        ));

        let settings = PopSettings {
            skeleton: vec![0.1, 0.3, 0.2],
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(PopErr::Domain(DomainErr::NonMonotoneSkeleton { dose: 3, .. }))
        ));

        let settings = PopSettings {
            risk_cutoff: 1.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = PopSettings {
            n_trial: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(PopErr::Configuration(ConfigurationErr::NoTrials))
        ));
    }
}
