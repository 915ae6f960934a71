//! Tagship Adapters - Registry publish adapters
//!
//! Each adapter turns a release checkout into the commands that build and
//! upload it. [`RegistryPublisher`] provides the checkout: a fresh clone of
//! the release tag in a temporary directory.

pub mod cargo;
pub mod custom;
pub mod npm;
pub mod publish;
pub mod python;
pub mod registry;
mod traits;

pub use cargo::CargoAdapter;
pub use custom::CustomAdapter;
pub use npm::NpmAdapter;
pub use publish::RegistryPublisher;
pub use python::{PythonAdapter, PythonTool};
pub use registry::adapter_from_config;
pub use traits::RegistryAdapter;
