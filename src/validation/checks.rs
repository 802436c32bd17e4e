use crate::error::PopErr;
use crate::validation::error::{ConfigurationErr, DomainErr};

pub fn check_target(target: f64) -> Result<(), PopErr> {
    if !(target > 0.0 && target < 1.0) {
        return Err(DomainErr::BadTarget(target).into());
    }
    Ok(())
}

/// Each entry must lie in (0, 1) and the sequence must be non-decreasing.
/// Doses in error messages are 1-based.
pub fn check_skeleton(skeleton: &[f64]) -> Result<(), PopErr> {
    if skeleton.is_empty() {
        return Err(ConfigurationErr::NoDoses.into());
    }
    for (i, &p) in skeleton.iter().enumerate() {
        if !(p > 0.0 && p < 1.0) {
            return Err(DomainErr::BadProbability {
                dose: i + 1,
                value: p,
            }
            .into());
        }
    }
    if let Some(i) = skeleton.windows(2).position(|w| w[1] < w[0]) {
        return Err(DomainErr::NonMonotoneSkeleton {
            dose: i + 2,
            prev_dose: i + 1,
            value: skeleton[i + 1],
        }
        .into());
    }
    Ok(())
}

pub fn check_counts(n_pts: &[usize], n_tox: &[usize]) -> Result<(), PopErr> {
    if n_pts.len() != n_tox.len() {
        return Err(DomainErr::MismatchedLengths {
            pts_length: n_pts.len(),
            tox_length: n_tox.len(),
        }
        .into());
    }
    if let Some((&n_pts, &n_tox)) = n_pts.iter().zip(n_tox).find(|(n, y)| y > n) {
        return Err(DomainErr::ToxicitiesExceedPatients { n_pts, n_tox }.into());
    }
    Ok(())
}

pub fn check_design_size(n_cohort: usize, cohort_size: usize) -> Result<(), PopErr> {
    if cohort_size < 1 {
        return Err(ConfigurationErr::BadCohortSize(cohort_size).into());
    }
    if n_cohort < 1 {
        return Err(ConfigurationErr::BadCohortCount(n_cohort).into());
    }
    Ok(())
}

pub fn check_start_dose(start_dose: usize, n_doses: usize) -> Result<(), PopErr> {
    if start_dose < 1 || start_dose > n_doses {
        return Err(ConfigurationErr::StartDoseOutOfRange {
            start_dose,
            n_doses,
        }
        .into());
    }
    Ok(())
}

pub fn check_multiplier(multiplier: f64) -> Result<(), PopErr> {
    if !(multiplier > 0.0 && multiplier.is_finite()) {
        return Err(DomainErr::BadMultiplier(multiplier).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn target_bounds() {
        assert!(check_target(0.3).is_ok());
        assert!(check_target(0.0).is_err());
        assert!(check_target(1.0).is_err());
        assert!(check_target(f64::NAN).is_err());
    }

    #[test]
    fn non_monotone_skeleton_error() {
        if let Err(e) = check_skeleton(&[0.1, 0.3, 0.2]) {
            assert_eq!(
                String::from(
                    "while validating inputs: skeleton should be non-decreasing; \
                     dose 3 (0.2) is below dose 2"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    #[test]
    fn skeleton_probability_out_of_range() {
        match check_skeleton(&[0.1, 1.0]) {
            Err(PopErr::Domain(DomainErr::BadProbability { dose, .. })) => assert_eq!(dose, 2),
            _ => panic!(),
        }
        assert!(matches!(
            check_skeleton(&[]),
            Err(PopErr::Configuration(ConfigurationErr::NoDoses))
        ));
    }

    #[test]
    fn mismatched_count_lengths() {
        assert!(matches!(
            check_counts(&[3, 3], &[0]),
            Err(PopErr::Domain(DomainErr::MismatchedLengths {
                pts_length: 2,
                tox_length: 1
            }))
        ));
        assert!(matches!(
            check_counts(&[3, 3], &[0, 4]),
            Err(PopErr::Domain(DomainErr::ToxicitiesExceedPatients {
                n_pts: 3,
                n_tox: 4
            }))
        ));
        assert!(check_counts(&[0, 3, 6], &[0, 1, 6]).is_ok());
    }

    #[test]
    fn design_size_and_start_dose() {
        assert!(check_design_size(10, 3).is_ok());
        assert!(check_design_size(10, 0).is_err());
        assert!(check_design_size(0, 3).is_err());
        assert!(check_start_dose(1, 4).is_ok());
        assert!(check_start_dose(0, 4).is_err());
        assert!(check_start_dose(5, 4).is_err());
    }
}
