//----------------------------------------
// operating characteristics mod
//----------------------------------------
pub mod get_oc;
pub mod types;
