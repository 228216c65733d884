//! Build settings: the enumerated inputs a package manager hands to the recipe.
//!
//! Settings are read from `key=value` pairs using the keys consumers already
//! know from their profiles (`os`, `arch`, `compiler`, `compiler.version`,
//! `compiler.runtime`, `compiler.libcxx`, `build_type`). Anything not given
//! falls back to a host default.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::errors::{split_pair, SettingsError};

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Os {
    Windows,
    Linux,
    Macos,
    FreeBsd,
    SunOs,
    Android,
    Ios,
}

impl Os {
    const NAMES: &'static [&'static str] =
        &["Windows", "Linux", "Macos", "FreeBSD", "SunOS", "Android", "iOS"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Windows => "Windows",
            Os::Linux => "Linux",
            Os::Macos => "Macos",
            Os::FreeBsd => "FreeBSD",
            Os::SunOs => "SunOS",
            Os::Android => "Android",
            Os::Ios => "iOS",
        }
    }

    pub fn is_windows(&self) -> bool {
        *self == Os::Windows
    }

    /// The operating system this binary was compiled for.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "windows" => Os::Windows,
            "macos" => Os::Macos,
            "freebsd" => Os::FreeBsd,
            "solaris" | "illumos" => Os::SunOs,
            "android" => Os::Android,
            "ios" => Os::Ios,
            _ => Os::Linux,
        }
    }
}

impl FromStr for Os {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" => Ok(Os::Windows),
            "linux" => Ok(Os::Linux),
            "macos" => Ok(Os::Macos),
            "freebsd" => Ok(Os::FreeBsd),
            "sunos" => Ok(Os::SunOs),
            "android" => Ok(Os::Android),
            "ios" => Ok(Os::Ios),
            _ => Err(SettingsError::invalid("os", s, Os::NAMES)),
        }
    }
}

/// Target CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Arch {
    X86,
    X86_64,
    Armv7,
    Armv8,
}

impl Arch {
    const NAMES: &'static [&'static str] = &["x86", "x86_64", "armv7", "armv8"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Armv7 => "armv7",
            Arch::Armv8 => "armv8",
        }
    }

    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "x86" => Arch::X86,
            "arm" => Arch::Armv7,
            "aarch64" => Arch::Armv8,
            _ => Arch::X86_64,
        }
    }
}

impl FromStr for Arch {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86" => Ok(Arch::X86),
            "x86_64" => Ok(Arch::X86_64),
            "armv7" => Ok(Arch::Armv7),
            "armv8" => Ok(Arch::Armv8),
            _ => Err(SettingsError::invalid("arch", s, Arch::NAMES)),
        }
    }
}

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompilerFamily {
    /// The Windows toolchain (cl.exe).
    VisualStudio,
    Gcc,
    Clang,
    AppleClang,
}

impl CompilerFamily {
    const NAMES: &'static [&'static str] = &["Visual Studio", "gcc", "clang", "apple-clang"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::VisualStudio => "Visual Studio",
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::AppleClang => "apple-clang",
        }
    }

    pub fn is_msvc(&self) -> bool {
        *self == CompilerFamily::VisualStudio
    }

    /// Any clang driver, Apple's included.
    pub fn is_clang(&self) -> bool {
        matches!(self, CompilerFamily::Clang | CompilerFamily::AppleClang)
    }
}

impl FromStr for CompilerFamily {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Visual Studio" | "msvc" => Ok(CompilerFamily::VisualStudio),
            "gcc" => Ok(CompilerFamily::Gcc),
            "clang" => Ok(CompilerFamily::Clang),
            "apple-clang" => Ok(CompilerFamily::AppleClang),
            _ => Err(SettingsError::invalid("compiler", s, CompilerFamily::NAMES)),
        }
    }
}

/// MSVC C runtime selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MsvcRuntime {
    /// Static CRT (/MT)
    Mt,
    /// Static debug CRT (/MTd)
    MtDebug,
    /// Dynamic CRT (/MD)
    Md,
    /// Dynamic debug CRT (/MDd)
    MdDebug,
}

impl MsvcRuntime {
    const NAMES: &'static [&'static str] = &["MT", "MTd", "MD", "MDd"];

    pub fn as_str(&self) -> &'static str {
        match self {
            MsvcRuntime::Mt => "MT",
            MsvcRuntime::MtDebug => "MTd",
            MsvcRuntime::Md => "MD",
            MsvcRuntime::MdDebug => "MDd",
        }
    }

    /// Whether the runtime name contains `MT`, i.e. the CRT is linked statically.
    pub fn is_static_crt(&self) -> bool {
        self.as_str().contains("MT")
    }

    /// Dynamic CRT matching the build type.
    pub fn default_for(build_type: BuildType) -> Self {
        match build_type {
            BuildType::Debug => MsvcRuntime::MdDebug,
            BuildType::Release => MsvcRuntime::Md,
        }
    }
}

impl FromStr for MsvcRuntime {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MT" => Ok(MsvcRuntime::Mt),
            "MTd" => Ok(MsvcRuntime::MtDebug),
            "MD" => Ok(MsvcRuntime::Md),
            "MDd" => Ok(MsvcRuntime::MdDebug),
            _ => Err(SettingsError::invalid("compiler.runtime", s, MsvcRuntime::NAMES)),
        }
    }
}

/// C++ standard library flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StdLib {
    /// GNU libstdc++ with the pre-C++11 ABI
    Libstdcxx,
    /// GNU libstdc++ with the C++11 ABI
    Libstdcxx11,
    /// LLVM libc++
    Libcxx,
}

impl StdLib {
    const NAMES: &'static [&'static str] = &["libstdc++", "libstdc++11", "libc++"];

    pub fn as_str(&self) -> &'static str {
        match self {
            StdLib::Libstdcxx => "libstdc++",
            StdLib::Libstdcxx11 => "libstdc++11",
            StdLib::Libcxx => "libc++",
        }
    }
}

impl FromStr for StdLib {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "libstdc++" => Ok(StdLib::Libstdcxx),
            "libstdc++11" => Ok(StdLib::Libstdcxx11),
            "libc++" => Ok(StdLib::Libcxx),
            _ => Err(SettingsError::invalid("compiler.libcxx", s, StdLib::NAMES)),
        }
    }
}

/// Build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuildType {
    Debug,
    Release,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }

    pub fn is_debug(&self) -> bool {
        *self == BuildType::Debug
    }
}

impl FromStr for BuildType {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            _ => Err(SettingsError::invalid("build_type", s, &["Debug", "Release"])),
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_as_str!(Os, Arch, CompilerFamily, MsvcRuntime, StdLib, BuildType);

/// Compiler identity as seen by the recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compiler {
    pub family: CompilerFamily,
    /// Version as written in the profile (`14`, `5.4`, `3.9`)
    pub version: String,
    /// Only present for Visual Studio
    pub runtime: Option<MsvcRuntime>,
    /// Never present for Visual Studio
    pub libcxx: Option<StdLib>,
}

impl Compiler {
    pub fn new(family: CompilerFamily, version: impl Into<String>) -> Self {
        Compiler {
            family,
            version: version.into(),
            runtime: None,
            libcxx: None,
        }
    }

    pub fn with_runtime(mut self, runtime: MsvcRuntime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn with_libcxx(mut self, libcxx: StdLib) -> Self {
        self.libcxx = Some(libcxx);
        self
    }

    /// Integer major version, as Visual Studio versions are written.
    pub fn major_version(&self) -> Option<u32> {
        self.version.parse().ok()
    }

    /// Default compiler for a host operating system.
    fn default_for(os: Os) -> Self {
        match os {
            Os::Windows => Compiler::new(CompilerFamily::VisualStudio, "14"),
            Os::Macos | Os::Ios => {
                Compiler::new(CompilerFamily::AppleClang, "9.0").with_libcxx(StdLib::Libcxx)
            }
            Os::FreeBsd => Compiler::new(CompilerFamily::Clang, "4.0").with_libcxx(StdLib::Libcxx),
            _ => Compiler::new(CompilerFamily::Gcc, "5").with_libcxx(StdLib::Libstdcxx11),
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.version)?;
        if let Some(runtime) = self.runtime {
            write!(f, " ({})", runtime)?;
        }
        if let Some(libcxx) = self.libcxx {
            write!(f, " ({})", libcxx)?;
        }
        Ok(())
    }
}

/// The complete settings tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSettings {
    pub os: Os,
    pub arch: Arch,
    pub compiler: Compiler,
    pub build_type: BuildType,
}

impl BuildSettings {
    pub fn new(os: Os, arch: Arch, compiler: Compiler, build_type: BuildType) -> Self {
        BuildSettings {
            os,
            arch,
            compiler,
            build_type,
        }
    }

    /// Host defaults, Release.
    pub fn host() -> Self {
        let os = Os::host();
        let mut compiler = Compiler::default_for(os);
        if compiler.family.is_msvc() {
            compiler.runtime = Some(MsvcRuntime::default_for(BuildType::Release));
        }
        BuildSettings::new(os, Arch::host(), compiler, BuildType::Release)
    }

    /// Parse settings from `key=value` pairs. Later pairs override earlier ones.
    ///
    /// Choosing a compiler family resets version, runtime and libcxx to that
    /// family's defaults unless they are given as well. A Visual Studio
    /// compiler without a runtime gets the dynamic CRT for its build type.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut os = None;
        let mut arch = None;
        let mut family = None;
        let mut version = None;
        let mut runtime = None;
        let mut libcxx = None;
        let mut build_type = None;

        for pair in pairs {
            let (key, value) = split_pair(pair.as_ref())?;
            match key {
                "os" => os = Some(value.parse::<Os>()?),
                "arch" => arch = Some(value.parse::<Arch>()?),
                "compiler" => family = Some(value.parse::<CompilerFamily>()?),
                "compiler.version" => version = Some(value.to_string()),
                "compiler.runtime" => runtime = Some(value.parse::<MsvcRuntime>()?),
                "compiler.libcxx" => libcxx = Some(value.parse::<StdLib>()?),
                "build_type" => build_type = Some(value.parse::<BuildType>()?),
                other => return Err(SettingsError::UnknownSetting(other.to_string())),
            }
        }

        let os = os.unwrap_or_else(Os::host);
        let build_type = build_type.unwrap_or(BuildType::Release);

        let default_compiler = Compiler::default_for(os);
        let compiler = match family {
            Some(family) if family != default_compiler.family => Compiler {
                family,
                version: version.unwrap_or_else(|| default_version(family).to_string()),
                runtime,
                libcxx,
            },
            _ => Compiler {
                family: default_compiler.family,
                version: version.unwrap_or(default_compiler.version),
                runtime,
                libcxx: libcxx.or(default_compiler.libcxx),
            },
        };

        let mut settings = BuildSettings::new(os, arch.unwrap_or_else(Arch::host), compiler, build_type);
        if settings.compiler.family.is_msvc() && settings.compiler.runtime.is_none() {
            settings.compiler.runtime = Some(MsvcRuntime::default_for(build_type));
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let compiler = &self.compiler;
        if compiler.family.is_msvc() {
            if compiler.libcxx.is_some() {
                return Err(SettingsError::LibcxxWithMsvc);
            }
            if compiler.major_version().is_none() {
                return Err(SettingsError::InvalidMsvcVersion(compiler.version.clone()));
            }
        } else if compiler.runtime.is_some() {
            return Err(SettingsError::RuntimeWithoutMsvc {
                compiler: compiler.family.to_string(),
            });
        }
        Ok(())
    }

    /// Settings rendered back as `key=value` pairs.
    pub fn to_pairs(&self) -> Vec<String> {
        let mut pairs = vec![
            format!("os={}", self.os),
            format!("arch={}", self.arch),
            format!("compiler={}", self.compiler.family),
            format!("compiler.version={}", self.compiler.version),
        ];
        if let Some(runtime) = self.compiler.runtime {
            pairs.push(format!("compiler.runtime={}", runtime));
        }
        if let Some(libcxx) = self.compiler.libcxx {
            pairs.push(format!("compiler.libcxx={}", libcxx));
        }
        pairs.push(format!("build_type={}", self.build_type));
        pairs
    }
}

fn default_version(family: CompilerFamily) -> &'static str {
    match family {
        CompilerFamily::VisualStudio => "14",
        CompilerFamily::Gcc => "5",
        CompilerFamily::Clang => "4.0",
        CompilerFamily::AppleClang => "9.0",
    }
}
