//! Recipe options and their configure-time normalization.

use serde::Serialize;

use crate::core::errors::{split_pair, SettingsError};
use crate::core::settings::BuildSettings;

/// Package options exposed by the recipe.
///
/// `fpic` is `None` once the option has been removed for the Windows
/// toolchain, which has no notion of position independent code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildOptions {
    #[serde(rename = "fPIC", skip_serializing_if = "Option::is_none")]
    pub fpic: Option<bool>,
    pub shared: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            fpic: Some(true),
            shared: false,
        }
    }
}

impl BuildOptions {
    /// Parse options from `key=value` pairs on top of the defaults.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = BuildOptions::default();
        for pair in pairs {
            let (key, value) = split_pair(pair.as_ref())?;
            options.set(key, value)?;
        }
        Ok(options)
    }

    /// Set a single option by name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "fPIC" => self.fpic = Some(parse_bool("fPIC", value)?),
            "shared" => self.shared = parse_bool("shared", value)?,
            other => return Err(SettingsError::UnknownOption(other.to_string())),
        }
        Ok(())
    }

    /// Whether `-fPIC` was requested. A removed option counts as false.
    pub fn fpic(&self) -> bool {
        self.fpic.unwrap_or(false)
    }

    /// Options as the recipe sees them after configuration.
    ///
    /// For the Windows toolchain `fPIC` is removed, and a shared build with a
    /// static CRT (`MT`, `MTd`) is forced back to a static one. Applying this
    /// twice yields the same value.
    pub fn normalized(self, settings: &BuildSettings) -> Self {
        let compiler = &settings.compiler;
        if !compiler.family.is_msvc() {
            return self;
        }

        let static_crt = compiler.runtime.is_some_and(|rt| rt.is_static_crt());
        if self.shared && static_crt {
            tracing::debug!(
                "forcing shared=False: runtime {} links the CRT statically",
                compiler.runtime.map(|rt| rt.as_str()).unwrap_or_default()
            );
        }

        BuildOptions {
            fpic: None,
            shared: self.shared && !static_crt,
        }
    }

    /// Options rendered back as `key=value` pairs.
    pub fn to_pairs(&self) -> Vec<String> {
        let mut pairs = Vec::new();
        if let Some(fpic) = self.fpic {
            pairs.push(format!("fPIC={}", bool_str(fpic)));
        }
        pairs.push(format!("shared={}", bool_str(self.shared)));
        pairs
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, SettingsError> {
    match value {
        "True" | "true" | "1" => Ok(true),
        "False" | "false" | "0" => Ok(false),
        _ => Err(SettingsError::invalid(key, value, &["True", "False"])),
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::{Arch, BuildType, Compiler, CompilerFamily, MsvcRuntime, Os};

    fn msvc(runtime: MsvcRuntime) -> BuildSettings {
        BuildSettings::new(
            Os::Windows,
            Arch::X86_64,
            Compiler::new(CompilerFamily::VisualStudio, "14").with_runtime(runtime),
            BuildType::Release,
        )
    }

    fn gcc() -> BuildSettings {
        BuildSettings::new(
            Os::Linux,
            Arch::X86_64,
            Compiler::new(CompilerFamily::Gcc, "5"),
            BuildType::Release,
        )
    }

    #[test]
    fn test_defaults() {
        let options = BuildOptions::default();
        assert_eq!(options.fpic, Some(true));
        assert!(!options.shared);
    }

    #[test]
    fn test_from_pairs() {
        let options = BuildOptions::from_pairs(["fPIC=False", "shared=True"]).unwrap();
        assert_eq!(options.fpic, Some(false));
        assert!(options.shared);

        assert_eq!(
            BuildOptions::from_pairs(["static=True"]).unwrap_err(),
            SettingsError::UnknownOption("static".to_string())
        );
        assert!(matches!(
            BuildOptions::from_pairs(["shared=maybe"]),
            Err(SettingsError::InvalidValue { key: "shared", .. })
        ));
    }

    #[test]
    fn test_static_crt_forces_static_library() {
        let options = BuildOptions {
            fpic: Some(true),
            shared: true,
        };

        for runtime in [MsvcRuntime::Mt, MsvcRuntime::MtDebug] {
            let normalized = options.normalized(&msvc(runtime));
            assert!(!normalized.shared);
            assert_eq!(normalized.fpic, None);
        }

        for runtime in [MsvcRuntime::Md, MsvcRuntime::MdDebug] {
            assert!(options.normalized(&msvc(runtime)).shared);
        }
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let options = BuildOptions {
            fpic: Some(true),
            shared: true,
        };
        let settings = msvc(MsvcRuntime::Mt);
        let once = options.normalized(&settings);
        assert_eq!(once, once.normalized(&settings));
    }

    #[test]
    fn test_non_msvc_untouched() {
        let options = BuildOptions {
            fpic: Some(false),
            shared: true,
        };
        assert_eq!(options.normalized(&gcc()), options);
    }

    #[test]
    fn test_to_pairs() {
        assert_eq!(
            BuildOptions::default().to_pairs(),
            vec!["fPIC=True".to_string(), "shared=False".to_string()]
        );
        let removed = BuildOptions::default().normalized(&msvc(MsvcRuntime::Md));
        assert_eq!(removed.to_pairs(), vec!["shared=False".to_string()]);
    }
}
