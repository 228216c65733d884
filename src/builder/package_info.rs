//! What the package tells its consumers: libraries to link and defines.

use serde::Serialize;

use crate::builder::naming::LibraryNaming;
use crate::core::errors::SettingsError;
use crate::core::options::BuildOptions;
use crate::core::recipe::Recipe;
use crate::core::settings::BuildSettings;

/// Always exported; consumers link the static libraries.
pub const STATIC_LIBS_DEFINE: &str = "BOOST_USE_STATIC_LIBS";

/// Exported for the Windows toolchain to turn off Boost's auto-linking pragmas.
pub const NO_AUTOLINK_DEFINE: &str = "BOOST_ALL_NO_LIB";

/// Link contract for downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub include_dirs: Vec<String>,
    pub lib_dirs: Vec<String>,
    pub libs: Vec<String>,
    pub defines: Vec<String>,
}

impl PackageInfo {
    pub fn for_config(
        settings: &BuildSettings,
        options: &BuildOptions,
        recipe: &Recipe,
    ) -> Result<Self, SettingsError> {
        let naming = LibraryNaming::for_config(settings, options, recipe)?;
        let libs = naming.decorate_all(recipe.libraries);

        let mut defines = vec![STATIC_LIBS_DEFINE.to_string()];
        if settings.compiler.family.is_msvc() {
            tracing::warn!("exported {} libraries: {:?}", recipe.name, libs);
            defines.push(NO_AUTOLINK_DEFINE.to_string());
        }

        Ok(PackageInfo {
            name: recipe.name.to_string(),
            version: recipe.version.to_string(),
            include_dirs: vec!["include".to_string()],
            lib_dirs: vec!["lib".to_string()],
            libs,
            defines,
        })
    }

    /// Compiler and linker flags in GCC syntax, for quick inspection.
    pub fn gcc_flags(&self) -> Vec<String> {
        let mut flags: Vec<String> = self.defines.iter().map(|d| format!("-D{}", d)).collect();
        flags.extend(self.include_dirs.iter().map(|d| format!("-I{}", d)));
        flags.extend(self.lib_dirs.iter().map(|d| format!("-L{}", d)));
        flags.extend(self.libs.iter().map(|l| format!("-l{}", l)));
        flags
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::{Arch, BuildType, Compiler, CompilerFamily, MsvcRuntime, Os, StdLib};

    #[test]
    fn test_gcc_package_info() {
        let settings = BuildSettings::new(
            Os::Linux,
            Arch::X86_64,
            Compiler::new(CompilerFamily::Gcc, "5").with_libcxx(StdLib::Libstdcxx11),
            BuildType::Release,
        );
        let info =
            PackageInfo::for_config(&settings, &BuildOptions::default(), &Recipe::boost()).unwrap();

        assert_eq!(info.defines, vec![STATIC_LIBS_DEFINE]);
        assert_eq!(info.libs.len(), 32);
        assert_eq!(info.libs[0], "boost_wave");
        assert_eq!(info.libs[3], "boost_test_exec_monitor");
        assert!(info.gcc_flags().contains(&"-lboost_system".to_string()));
    }

    #[test]
    fn test_msvc_package_info() {
        let settings = BuildSettings::new(
            Os::Windows,
            Arch::X86,
            Compiler::new(CompilerFamily::VisualStudio, "14").with_runtime(MsvcRuntime::Mt),
            BuildType::Debug,
        );
        let info =
            PackageInfo::for_config(&settings, &BuildOptions::default(), &Recipe::boost()).unwrap();

        assert_eq!(info.defines, vec![STATIC_LIBS_DEFINE, NO_AUTOLINK_DEFINE]);
        assert!(info
            .libs
            .contains(&"libboost_thread-vc140-mt-sgd-1_63".to_string()));
        assert_eq!(
            info.libs.last().map(String::as_str),
            Some("libboost_exception-vc140-mt-sgd-1_63")
        );
    }

    #[test]
    fn test_json_shape() {
        let settings = BuildSettings::new(
            Os::Linux,
            Arch::X86_64,
            Compiler::new(CompilerFamily::Clang, "4.0"),
            BuildType::Release,
        );
        let info =
            PackageInfo::for_config(&settings, &BuildOptions::default(), &Recipe::boost()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&info.to_json().unwrap()).unwrap();

        assert_eq!(value["name"], "Boost");
        assert_eq!(value["version"], "1.63.0");
        assert_eq!(value["defines"][0], "BOOST_USE_STATIC_LIBS");
        assert_eq!(value["libs"].as_array().map(Vec::len), Some(32));
    }
}
