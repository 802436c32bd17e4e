use statrs::function::beta::ln_beta;

use crate::error::PopErr;
use crate::validation::checks::{check_multiplier, check_target};
use crate::validation::error::DomainErr;

/// Default multiplier applied to the predictive Bayes factor
pub const DEFAULT_BF_MULTIPLIER: f64 = std::f64::consts::E;

/// Predictive Bayes factor PrBF_{0,1} for `y` toxicities among `n` patients
/// at a dose, comparing "the dose is at target" against "the dose is not".
/// Uses the default multiplier e.
pub fn pr_bf(n: usize, y: usize, target: f64) -> Result<f64, PopErr> {
    pr_bf_scaled(n, y, target, DEFAULT_BF_MULTIPLIER)
}

/// PrBF_{0,1}(n, y) =
///     c * phi^y (1 - phi)^(n - y) B(y + 1, n - y + 1)^n
///     / [B(y + 2, n - y + 1)^y B(y + 1, n - y + 2)^(n - y)]
///
/// The denominator over B(y + 1, n - y + 1)^n is the product of each
/// patient's posterior predictive probability under a uniform prior, so the
/// ratio is the point-null likelihood over the predictive likelihood.
/// Evaluated on the log scale.
pub fn pr_bf_scaled(n: usize, y: usize, target: f64, multiplier: f64) -> Result<f64, PopErr> {
    if n == 0 {
        return Err(DomainErr::ZeroPatients.into());
    }
    if y > n {
        return Err(DomainErr::ToxicitiesExceedPatients { n_pts: n, n_tox: y }.into());
    }
    check_target(target)?;
    check_multiplier(multiplier)?;

    Ok((ln_pr_bf(n, y, target) + multiplier.ln()).exp())
}

fn ln_pr_bf(n: usize, y: usize, target: f64) -> f64 {
    let n_f = n as f64;
    let y_f = y as f64;
    let no_tox = n_f - y_f;

    // `0 * ln(x)` is 0 here since target is strictly inside (0, 1)
    let ln_null = y_f * target.ln() + no_tox * (1.0 - target).ln();
    let ln_predictive = y_f * ln_beta(y_f + 2.0, no_tox + 1.0)
        + no_tox * ln_beta(y_f + 1.0, no_tox + 2.0)
        - n_f * ln_beta(y_f + 1.0, no_tox + 1.0);

    ln_null - ln_predictive
}

#[cfg(test)]
mod tests {
    use statrs::function::gamma::gamma;

    use super::*;

    fn beta_via_gamma(a: f64, b: f64) -> f64 {
        gamma(a) * gamma(b) / gamma(a + b)
    }

    // Direct product form, no logs
    fn reference_pr_bf(n: usize, y: usize, phi: f64) -> f64 {
        let (n_f, y_f) = (n as f64, y as f64);
        let numerator = phi.powf(y_f)
            * (1.0 - phi).powf(n_f - y_f)
            * beta_via_gamma(y_f + 1.0, n_f - y_f + 1.0).powf(n_f)
            * std::f64::consts::E;
        let denominator = beta_via_gamma(y_f + 2.0, n_f - y_f + 1.0).powf(y_f)
            * beta_via_gamma(y_f + 1.0, n_f - y_f + 2.0).powf(n_f - y_f);
        numerator / denominator
    }

    #[test]
    fn matches_reference_n10_y3() {
        let bf = pr_bf(10, 3, 0.3).expect("failed to compute Bayes factor");
        let reference = reference_pr_bf(10, 3, 0.3);
        assert!(((bf - reference) / reference).abs() < 1e-6);
    }

    #[test]
    fn matches_reference_grid() {
        for n in 1..=12 {
            for y in 0..=n {
                let bf = pr_bf(n, y, 0.25).expect("failed to compute Bayes factor");
                let reference = reference_pr_bf(n, y, 0.25);
                assert!(((bf - reference) / reference).abs() < 1e-6, "n = {n}, y = {y}");
            }
        }
    }

    #[test]
    fn hand_computed_values() {
        // n = 3, y = 1: 0.147 / 0.144
        let bf = pr_bf_scaled(3, 1, 0.3, 1.0).expect("failed to compute Bayes factor");
        assert!((bf - 0.147 / 0.144).abs() < 1e-10);

        // n = 1, y = 0: 0.7 * B(1, 2) / B(1, 3) = 0.7 * 1.5
        let bf = pr_bf_scaled(1, 0, 0.3, 1.0).expect("failed to compute Bayes factor");
        assert!((bf - 1.05).abs() < 1e-10);
    }

    #[test]
    fn multiplier_scales_linearly() {
        let unscaled = pr_bf_scaled(6, 2, 0.3, 1.0).expect("failed to compute Bayes factor");
        let scaled = pr_bf(6, 2, 0.3).expect("failed to compute Bayes factor");
        assert!((scaled - unscaled * std::f64::consts::E).abs() < 1e-10);
    }

    #[test]
    fn zero_patients_error() {
        if let Err(e) = pr_bf(0, 0, 0.3) {
            assert_eq!(
                String::from(
                    "while validating inputs: Bayes factor is undefined for zero patients"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    #[test]
    fn invalid_arguments() {
        assert!(pr_bf(3, 4, 0.3).is_err());
        assert!(pr_bf(3, 1, 1.3).is_err());
        assert!(pr_bf_scaled(3, 1, 0.3, 0.0).is_err());
    }
}
