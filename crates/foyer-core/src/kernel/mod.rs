//! # Foyer Core Kernel
//!
//! The bootloader and its supporting pieces: the compile-time built-in
//! module table, shared constants, and the top-level error type.

pub mod bootstrap;
pub mod builtin;
pub mod constants;
pub mod error;

pub use bootstrap::{Bootloader, ModuleProvider};
pub use builtin::{builtin_modules, BuiltinModuleDef};
pub use error::{BootPhase, Error, Result};

#[cfg(test)]
mod tests;
