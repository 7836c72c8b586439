//! Global metrics of the filler binary.

mod version;
pub use version::VersionInfo;
