//----------------------------------------
// validation mod
//----------------------------------------
pub mod checks;
pub mod error;
