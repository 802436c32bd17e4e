//----------------------------------------
// MTD selection mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoseEstimate {
    /// 1-based dose level
    pub dose: usize,
    pub p_hat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MtdSelection {
    pub target: f64,
    /// 1-based dose level
    pub mtd: usize,
    /// Isotonic toxicity estimates for every dose with at least one patient
    pub estimates: Vec<DoseEstimate>,
}
