//! Archive emission.
//!
//! The packaging layer proper: consumes a declared [`PackageLayout`] plus
//! the tag naming the variant, and produces the installable archive. The
//! orchestrator's only contract with this module is "what files go where"
//! and "what tag names this variant".
//!
//! [`PackageLayout`]: crate::packager::builder::layout::PackageLayout

mod sdist;
mod wheel;

pub use sdist::write_sdist;
pub use wheel::write_wheel;
