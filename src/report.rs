//----------------------------------------
// report mod
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::boundary::types::PopBoundary;
use crate::oc::types::OperatingCharacteristics;
use crate::select_mtd::types::MtdSelection;

/// Any of the three things the crate computes, tagged so a caller can tell
/// them apart after serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PopResult {
    Boundary(PopBoundary),
    OperatingCharacteristics(OperatingCharacteristics),
    MtdSelection(MtdSelection),
}

impl From<PopBoundary> for PopResult {
    fn from(boundary: PopBoundary) -> Self {
        PopResult::Boundary(boundary)
    }
}

impl From<OperatingCharacteristics> for PopResult {
    fn from(oc: OperatingCharacteristics) -> Self {
        PopResult::OperatingCharacteristics(oc)
    }
}

impl From<MtdSelection> for PopResult {
    fn from(selection: MtdSelection) -> Self {
        PopResult::MtdSelection(selection)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::select_mtd::select_mtd::select_mtd;

    #[test]
    fn tagged_json() {
        let selection = select_mtd(0.3, &[0, 3, 15, 9, 0], &[0, 0, 4, 4, 0])
            .expect("failed to select MTD");
        let result = PopResult::from(selection);
        let json = serde_json::to_value(&result).expect("failed to serialize");
        assert_eq!(json["kind"], "mtd_selection");
        assert_eq!(json["mtd"], 3);

        let back: PopResult = serde_json::from_value(json).expect("failed to deserialize");
        assert_eq!(back, result);
    }
}
