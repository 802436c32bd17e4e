//----------------------------------------
// simulation mod
//----------------------------------------
pub mod sim_trial;
pub mod types;
