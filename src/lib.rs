//! boostpkg - fetch, build and package Boost for a C/C++ package manager
//!
//! This crate provides the recipe logic: settings and options, b2 flag
//! derivation, decorated library naming, and the source/build/package
//! operations built on top of them.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use builder::{BuildContext, FlagSet, PackageInfo};
pub use core::{BuildOptions, BuildSettings, Recipe};
pub use util::context::GlobalContext;
