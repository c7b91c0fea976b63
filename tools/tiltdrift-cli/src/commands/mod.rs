pub mod analyze;
pub mod check;
pub mod replay;
pub mod run;
pub mod simulate;
