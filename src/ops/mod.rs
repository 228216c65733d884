//! High-level recipe operations.

pub mod build;
pub mod create;
pub mod package;
pub mod source;
pub mod test_package;

pub use build::build;
pub use create::create;
pub use package::{package, PackageSummary};
pub use source::{fetch_source, SourceOptions};
pub use test_package::{test_package, TestPackageOptions};
