//----------------------------------------
// computation mod
//----------------------------------------
pub use crate::bayes_factor::pr_bf::{DEFAULT_BF_MULTIPLIER, pr_bf, pr_bf_scaled};
pub use crate::boundary::get_boundary::get_boundary;
pub use crate::boundary::types::{BoundaryRow, BoundaryTable, Cutoff, PopBoundary};
pub use crate::oc::get_oc::get_oc;
pub use crate::oc::types::OperatingCharacteristics;
pub use crate::pop_settings::PopSettings;
pub use crate::report::PopResult;
pub use crate::select_mtd::select_mtd::select_mtd;
pub use crate::select_mtd::types::{DoseEstimate, MtdSelection};
pub use crate::simulation::sim_trial::sim_trial;
pub use crate::simulation::types::{TrialDesign, TrialOutcome};
