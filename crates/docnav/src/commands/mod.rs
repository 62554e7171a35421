//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod redirect;
pub(crate) mod releases;

pub(crate) use build::BuildArgs;
pub(crate) use redirect::RedirectArgs;
pub(crate) use releases::ReleasesArgs;
