//! Checking context: registries and scope environments.

pub mod env;
pub mod registry;

pub use env::{Binding, Environment};
pub use registry::{MethodSignature, Registry};
