//----------------------------------------
// bayes factor mod
//----------------------------------------
pub mod pr_bf;
