//! Version information for the filler.

/// The latest version from Cargo.toml.
pub(crate) const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The build timestamp.
pub(crate) const VERGEN_BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");

/// The target triple.
pub(crate) const VERGEN_CARGO_TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");

/// The build features.
pub(crate) const VERGEN_CARGO_FEATURES: &str = env!("VERGEN_CARGO_FEATURES");

/// The build profile name.
pub(crate) const BUILD_PROFILE_NAME: &str = env!("FILLER_BUILD_PROFILE");

/// The short version shown by `--version`.
pub(crate) const SHORT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The long version shown by `--help`.
pub(crate) const LONG_VERSION: &str = concat!(
    "Version: ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Build Timestamp: ",
    env!("VERGEN_BUILD_TIMESTAMP"),
    "\n",
    "Build Features: ",
    env!("VERGEN_CARGO_FEATURES"),
    "\n",
    "Build Profile: ",
    env!("FILLER_BUILD_PROFILE"),
);
