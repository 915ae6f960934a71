//! Release workflow building blocks

mod confirm;
mod validation;

pub use confirm::*;
pub use validation::*;
