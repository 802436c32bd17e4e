//----------------------------------------
// boundary mod
//----------------------------------------
pub mod get_boundary;
pub mod types;
