//! Static asset publisher for docship.
//!
//! Copies build output and demo directories into a documentation site's output
//! directory once the documentation build has finished.

pub mod config;
pub mod copy;
pub mod error;
pub mod publisher;

pub use config::{CopyJob, CopyOptions, PublishConfig, ResolvedJob, SiteConfig};
pub use copy::{copy_file, copy_tree, CopyStats};
pub use error::PublishError;
pub use publisher::{JobReport, PublishResult, Publisher};
