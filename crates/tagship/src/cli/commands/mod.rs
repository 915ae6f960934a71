//! CLI commands

mod release;

pub use release::ReleaseProcedure;
