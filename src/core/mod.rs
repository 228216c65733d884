//! Core data types: settings, options and recipe metadata.

pub mod errors;
pub mod options;
pub mod recipe;
pub mod settings;

pub use errors::SettingsError;
pub use options::BuildOptions;
pub use recipe::Recipe;
pub use settings::{Arch, BuildSettings, BuildType, Compiler, CompilerFamily, MsvcRuntime, Os, StdLib};
