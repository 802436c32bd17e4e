//----------------------------------------
// MTD selection mod
//----------------------------------------
pub mod error;
pub(crate) mod pava;
pub mod select_mtd;
pub mod types;
