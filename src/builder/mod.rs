//! Flag derivation and artifact naming for the b2 build.
//!
//! Everything here is a pure function of the settings and options; the
//! process invocations that consume it live in `ops`.

pub mod b2;
pub mod context;
pub mod naming;
pub mod package_info;

pub use b2::{derive_flags, B2Flag, Bootstrap, FlagSet};
pub use context::BuildContext;
pub use naming::{LibraryNaming, LibrarySuffix};
pub use package_info::PackageInfo;
