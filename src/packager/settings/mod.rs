//! Configuration structures for packaging runs.

#![allow(dead_code)] // Public API - settings accessors are part of the library surface

mod builder;
mod core;
mod mode;
mod package;

pub use builder::SettingsBuilder;
pub use core::Settings;
pub use mode::PackageMode;
pub use package::PackageSettings;
