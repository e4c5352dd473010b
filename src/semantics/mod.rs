pub mod checker;
pub mod symbols;
pub mod types;
