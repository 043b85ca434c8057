pub mod line;
pub mod r2;
