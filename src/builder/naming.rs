//! Decorated library names.
//!
//! Boost built with the Windows toolchain encodes the compiler, runtime and
//! ABI in each library file name, e.g. `libboost_thread-vc140-mt-sgd-1_63`.
//! Every other toolchain uses the plain `boost_<name>` form.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::core::errors::SettingsError;
use crate::core::options::BuildOptions;
use crate::core::recipe::Recipe;
use crate::core::settings::{BuildSettings, MsvcRuntime};

/// Libraries that always carry the `lib` prefix, even in shared builds.
pub const ALWAYS_LIB_PREFIXED: &[&str] = &["exception", "test_exec_monitor"];

static SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^vc(\d+)-(mtd|mt|mdd|md)(?:-(sgd|s|gd))?-(\d+)_(\d+)$")
        .expect("suffix pattern is valid")
});

/// ABI tags: `s` for a static CRT, `gd` for debug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbiTags {
    pub static_crt: bool,
    pub debug: bool,
}

impl fmt::Display for AbiTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.static_crt && !self.debug {
            return Ok(());
        }
        f.write_str("-")?;
        if self.static_crt {
            f.write_str("s")?;
        }
        if self.debug {
            f.write_str("gd")?;
        }
        Ok(())
    }
}

/// The `vc{tag}-{runtime}{abi}-{major}_{minor}` part of a decorated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySuffix {
    /// Compiler version times ten (`140` for version 14)
    pub compiler_tag: u32,
    pub runtime: MsvcRuntime,
    pub abi: AbiTags,
    pub version_major: u64,
    pub version_minor: u64,
}

impl LibrarySuffix {
    /// Suffix for a Visual Studio configuration.
    ///
    /// A missing runtime is treated as the dynamic CRT for the build type.
    pub fn for_settings(settings: &BuildSettings, recipe: &Recipe) -> Result<Self, SettingsError> {
        let compiler = &settings.compiler;
        let version = compiler
            .major_version()
            .ok_or_else(|| SettingsError::InvalidMsvcVersion(compiler.version.clone()))?;
        let runtime = compiler
            .runtime
            .unwrap_or_else(|| MsvcRuntime::default_for(settings.build_type));

        Ok(LibrarySuffix {
            compiler_tag: version * 10,
            runtime,
            abi: AbiTags {
                static_crt: matches!(runtime, MsvcRuntime::Mt | MsvcRuntime::MtDebug),
                debug: settings.build_type.is_debug(),
            },
            version_major: recipe.version.major,
            version_minor: recipe.version.minor,
        })
    }
}

impl fmt::Display for LibrarySuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vc{}-{}{}-{}_{}",
            self.compiler_tag,
            self.runtime.as_str().to_lowercase(),
            self.abi,
            self.version_major,
            self.version_minor
        )
    }
}

/// A string that is not a library suffix.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("`{0}` is not a library suffix (expected `vc<NNN>-<runtime>[-<abi>]-<major>_<minor>`)")]
pub struct ParseSuffixError(String);

impl FromStr for LibrarySuffix {
    type Err = ParseSuffixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSuffixError(s.to_string());
        let caps = SUFFIX_RE.captures(s).ok_or_else(err)?;

        let runtime = match &caps[2] {
            "mt" => MsvcRuntime::Mt,
            "mtd" => MsvcRuntime::MtDebug,
            "md" => MsvcRuntime::Md,
            _ => MsvcRuntime::MdDebug,
        };
        let abi = match caps.get(3).map(|m| m.as_str()) {
            Some("sgd") => AbiTags {
                static_crt: true,
                debug: true,
            },
            Some("s") => AbiTags {
                static_crt: true,
                debug: false,
            },
            Some(_) => AbiTags {
                static_crt: false,
                debug: true,
            },
            None => AbiTags::default(),
        };

        Ok(LibrarySuffix {
            compiler_tag: caps[1].parse().map_err(|_| err())?,
            runtime,
            abi,
            version_major: caps[4].parse().map_err(|_| err())?,
            version_minor: caps[5].parse().map_err(|_| err())?,
        })
    }
}

/// Naming scheme for one configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryNaming {
    /// `boost_<name>`
    Plain,
    /// `[lib]boost_<name>-<suffix>`
    Decorated { suffix: LibrarySuffix, shared: bool },
}

impl LibraryNaming {
    pub fn for_config(
        settings: &BuildSettings,
        options: &BuildOptions,
        recipe: &Recipe,
    ) -> Result<Self, SettingsError> {
        if !settings.compiler.family.is_msvc() {
            return Ok(LibraryNaming::Plain);
        }
        let options = options.normalized(settings);
        Ok(LibraryNaming::Decorated {
            suffix: LibrarySuffix::for_settings(settings, recipe)?,
            shared: options.shared,
        })
    }

    /// Decorated name for a library base name (`thread`).
    pub fn decorate(&self, base: &str) -> String {
        match self {
            LibraryNaming::Plain => format!("boost_{}", base),
            LibraryNaming::Decorated { suffix, shared } => {
                let prefix = if !shared || ALWAYS_LIB_PREFIXED.contains(&base) {
                    "lib"
                } else {
                    ""
                };
                format!("{}boost_{}-{}", prefix, base, suffix)
            }
        }
    }

    /// Decorate every library of the recipe.
    ///
    /// Decorated names list the always-`lib` libraries last.
    pub fn decorate_all(&self, libraries: &[&str]) -> Vec<String> {
        match self {
            LibraryNaming::Plain => libraries.iter().map(|lib| self.decorate(lib)).collect(),
            LibraryNaming::Decorated { .. } => {
                let (special, regular): (Vec<&str>, Vec<&str>) = libraries
                    .iter()
                    .copied()
                    .partition(|lib| ALWAYS_LIB_PREFIXED.contains(lib));
                regular
                    .into_iter()
                    .chain(special)
                    .map(|lib| self.decorate(lib))
                    .collect()
            }
        }
    }

    /// File name the build produces for a decorated library name.
    pub fn file_name(&self, decorated: &str) -> String {
        match self {
            LibraryNaming::Plain => format!("lib{}.a", decorated),
            LibraryNaming::Decorated { .. } => format!("{}.lib", decorated),
        }
    }
}
