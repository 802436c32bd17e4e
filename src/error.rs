//----------------------------------------
// Crate error type
//----------------------------------------
use crate::select_mtd::error::DegenerateTrialErr;
use crate::validation::error::{ConfigurationErr, DomainErr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PopErr {
    #[error("while validating inputs: {0}")]
    Domain(DomainErr),
    #[error("while validating configuration: {0}")]
    Configuration(ConfigurationErr),
    #[error("while simulating trial: {0}")]
    DegenerateTrial(DegenerateTrialErr),
}
