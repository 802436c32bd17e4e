//----------------------------------------
// MTD selection errors
//----------------------------------------
use crate::error::PopErr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DegenerateTrialErr {
    #[error("no patients were treated at any dose, so no MTD can be selected")]
    NoPatientsTreated,
}

impl Into<PopErr> for DegenerateTrialErr {
    fn into(self) -> PopErr {
        PopErr::DegenerateTrial(self)
    }
}
