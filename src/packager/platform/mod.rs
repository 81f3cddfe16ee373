//! Platform identity, naming conventions, and distribution tags.

mod descriptor;
mod tag;

pub use descriptor::{Family, PlatformDescriptor, host, resolve};
pub use tag::{DistributionTag, distribution_tag};
