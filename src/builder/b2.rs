//! b2 flag derivation.
//!
//! Flags are kept as typed records until they reach the process boundary.
//! `B2Flag::to_token` renders the shell form (quoted, as it appears in a
//! logged command line) and `B2Flag::to_arg` the argv form handed to
//! `Command` directly.

use std::fmt;

use crate::core::options::BuildOptions;
use crate::core::settings::{Arch, BuildSettings, BuildType, CompilerFamily, Os, StdLib};

/// Options always appended after the derived flags.
pub const FIXED_B2_ARGS: [&str; 2] = ["--abbreviate-paths", "--without-python"];

/// Static or shared linkage, as b2 spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    Static,
    Shared,
}

impl Linkage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Linkage::Static => "static",
            Linkage::Shared => "shared",
        }
    }
}

/// A single b2 command-line flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum B2Flag {
    /// `--layout=system`
    SystemLayout,
    /// `toolset=<name>`
    Toolset(String),
    /// `link=<linkage>`
    Link(Linkage),
    /// `runtime-link=<linkage>`
    RuntimeLink(Linkage),
    /// `variant=<build type>`
    Variant(BuildType),
    /// `address-model=<bits>`
    AddressModel(u8),
    /// `define=<macro>`
    Define(String),
    /// `linkflags="<flags>"`
    LinkFlags(Vec<String>),
    /// `cxxflags="<flags>"`
    CxxFlags(Vec<String>),
}

impl B2Flag {
    /// Shell rendering, with multi-word values quoted.
    pub fn to_token(&self) -> String {
        match self {
            B2Flag::LinkFlags(flags) => format!("linkflags=\"{}\"", flags.join(" ")),
            B2Flag::CxxFlags(flags) => format!("cxxflags=\"{}\"", flags.join(" ")),
            other => other.to_arg(),
        }
    }

    /// Single argv element, no shell quoting.
    pub fn to_arg(&self) -> String {
        match self {
            B2Flag::SystemLayout => "--layout=system".to_string(),
            B2Flag::Toolset(name) => format!("toolset={}", name),
            B2Flag::Link(linkage) => format!("link={}", linkage.as_str()),
            B2Flag::RuntimeLink(linkage) => format!("runtime-link={}", linkage.as_str()),
            B2Flag::Variant(build_type) => {
                format!("variant={}", build_type.as_str().to_lowercase())
            }
            B2Flag::AddressModel(bits) => format!("address-model={}", bits),
            B2Flag::Define(define) => format!("define={}", define),
            B2Flag::LinkFlags(flags) => format!("linkflags={}", flags.join(" ")),
            B2Flag::CxxFlags(flags) => format!("cxxflags={}", flags.join(" ")),
        }
    }
}

impl fmt::Display for B2Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token())
    }
}

/// Ordered list of b2 flags. Later flags may override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    flags: Vec<B2Flag>,
}

impl FlagSet {
    pub fn new() -> Self {
        FlagSet::default()
    }

    pub fn push(&mut self, flag: B2Flag) {
        self.flags.push(flag);
    }

    pub fn iter(&self) -> impl Iterator<Item = &B2Flag> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// The `cxxflags` sub-list, if one was emitted.
    pub fn cxx_flags(&self) -> Option<&[String]> {
        self.flags.iter().find_map(|flag| match flag {
            B2Flag::CxxFlags(flags) => Some(flags.as_slice()),
            _ => None,
        })
    }

    pub fn tokens(&self) -> Vec<String> {
        self.flags.iter().map(B2Flag::to_token).collect()
    }

    pub fn args(&self) -> Vec<String> {
        self.flags.iter().map(B2Flag::to_arg).collect()
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}

/// How to invoke Boost's bootstrap script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    /// Script file name inside the source folder
    pub script: &'static str,
    /// Toolset argument passed to the script
    pub args: Vec<&'static str>,
}

impl Bootstrap {
    pub fn for_settings(settings: &BuildSettings) -> Self {
        let script = if settings.os.is_windows() {
            "bootstrap.bat"
        } else {
            "bootstrap.sh"
        };

        let args = if uses_mingw(settings) {
            vec!["mingw"]
        } else {
            Vec::new()
        };

        Bootstrap { script, args }
    }

    /// The command as a user would type it in the source folder.
    pub fn display_command(&self) -> String {
        let mut parts = vec![if self.script.ends_with(".bat") {
            "bootstrap".to_string()
        } else {
            format!("./{}", self.script)
        }];
        parts.extend(self.args.iter().map(|s| s.to_string()));
        parts.join(" ")
    }
}

/// File name of the b2 executable produced by bootstrap.
pub fn b2_program(os: Os) -> &'static str {
    if os.is_windows() {
        "b2.exe"
    } else {
        "b2"
    }
}

fn uses_mingw(settings: &BuildSettings) -> bool {
    settings.os.is_windows() && settings.compiler.family == CompilerFamily::Gcc
}

/// Derive the b2 flags for a configuration.
///
/// `options` are normalized against `settings` first, so callers may pass
/// the raw user options.
pub fn derive_flags(settings: &BuildSettings, options: &BuildOptions) -> FlagSet {
    let options = options.normalized(settings);
    let compiler = &settings.compiler;
    let mut flags = FlagSet::new();

    if uses_mingw(settings) {
        flags.push(B2Flag::SystemLayout);
    }

    match compiler.family {
        CompilerFamily::VisualStudio => {
            flags.push(B2Flag::Toolset(format!("msvc-{}.0", compiler.version)))
        }
        CompilerFamily::Gcc | CompilerFamily::Clang => {
            flags.push(B2Flag::Toolset(compiler.family.as_str().to_string()))
        }
        CompilerFamily::AppleClang => {}
    }

    flags.push(B2Flag::Link(Linkage::Static));

    if compiler.family.is_msvc() {
        if let Some(runtime) = compiler.runtime {
            let linkage = if runtime.is_static_crt() {
                Linkage::Static
            } else {
                Linkage::Shared
            };
            flags.push(B2Flag::RuntimeLink(linkage));
        }
    }

    flags.push(B2Flag::Variant(settings.build_type));

    let bits = if settings.arch == Arch::X86 { 32 } else { 64 };
    flags.push(B2Flag::AddressModel(bits));

    let mut cxx_flags = Vec::new();

    if !compiler.family.is_msvc() && options.fpic() {
        cxx_flags.push("-fPIC".to_string());
    }

    match compiler.libcxx {
        Some(StdLib::Libstdcxx) => flags.push(B2Flag::Define("_GLIBCXX_USE_CXX11_ABI=0".into())),
        Some(StdLib::Libstdcxx11) => flags.push(B2Flag::Define("_GLIBCXX_USE_CXX11_ABI=1".into())),
        Some(StdLib::Libcxx) | None => {}
    }

    if compiler.family.is_clang() {
        if compiler.libcxx == Some(StdLib::Libcxx) {
            cxx_flags.push("-stdlib=libc++".to_string());
            cxx_flags.push("-std=c++11".to_string());
            flags.push(B2Flag::LinkFlags(vec!["-stdlib=libc++".to_string()]));
        } else {
            cxx_flags.push("-stdlib=libstdc++".to_string());
            cxx_flags.push("-std=c++11".to_string());
        }
    }

    if !cxx_flags.is_empty() {
        flags.push(B2Flag::CxxFlags(cxx_flags));
    }

    flags
}

/// Full b2 argument list: derived flags, job count, fixed options.
pub fn b2_args(settings: &BuildSettings, options: &BuildOptions, jobs: usize) -> Vec<String> {
    let mut args = derive_flags(settings, options).args();
    args.push(format!("-j{}", jobs));
    args.extend(FIXED_B2_ARGS.iter().map(|s| s.to_string()));
    args
}
