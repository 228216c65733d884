//! Copy build output into the package layout.
//!
//! ```text
//! <package>/
//!   FindBoost.cmake, OriginalFindBoost*
//!   include/boost/...
//!   lib/*.a | *.lib
//!   boostinfo.json
//! ```

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::builder::BuildContext;
use crate::core::recipe::EXPORTS;
use crate::util::fs::{copy_dir_all, copy_matching, ensure_dir, write_string};

/// Consumer-facing package description written into the package root.
pub const PACKAGE_INFO_FILE: &str = "boostinfo.json";

/// Static and import library patterns collected from `stage/lib`.
const LIB_PATTERNS: &[&str] = &["*.a", "*.lib"];

/// What ended up in the package.
#[derive(Debug, Clone, Default)]
pub struct PackageSummary {
    pub exports: Vec<PathBuf>,
    pub header_count: usize,
    pub libs: Vec<PathBuf>,
    /// Declared libraries with no matching file in `lib/`
    pub missing: Vec<String>,
}

/// Assemble the package directory from the built source tree.
pub fn package(ctx: &BuildContext) -> Result<PackageSummary> {
    let source_dir = ctx.source_dir();
    let headers = source_dir.join(ctx.recipe.include_root);
    if !headers.is_dir() {
        bail!(
            "header directory {} not found\n\
             help: Run `boostpkg source` and `boostpkg build` first",
            headers.display()
        );
    }

    let pkg = &ctx.package_dir;
    ensure_dir(pkg)?;
    let mut summary = PackageSummary::default();

    for pattern in EXPORTS {
        summary.exports.extend(copy_matching(&ctx.recipe_dir, pattern, pkg)?);
    }

    summary.header_count =
        copy_dir_all(&headers, &pkg.join("include").join(ctx.recipe.include_root))?;

    let lib_dir = pkg.join("lib");
    ensure_dir(&lib_dir)?;
    for pattern in LIB_PATTERNS {
        summary.libs.extend(copy_matching(&ctx.stage_lib_dir(), pattern, &lib_dir)?);
    }

    let info = ctx.package_info()?;
    let naming = ctx.naming()?;
    summary.missing = info
        .libs
        .iter()
        .filter(|lib| !lib_dir.join(naming.file_name(lib)).exists())
        .cloned()
        .collect();
    if !summary.missing.is_empty() {
        tracing::warn!(
            "{} declared libraries were not built: {}",
            summary.missing.len(),
            summary.missing.join(", ")
        );
    }

    write_string(&pkg.join(PACKAGE_INFO_FILE), &info.to_json()?)?;

    tracing::info!(
        "Packaged {} headers and {} libraries into {}",
        summary.header_count,
        summary.libs.len(),
        pkg.display()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use crate::builder::package_info::PackageInfo;
    use crate::core::{Arch, BuildOptions, BuildSettings, BuildType, Compiler, CompilerFamily, Os};
    use tempfile::TempDir;

    fn context(root: &Path) -> BuildContext {
        let settings = BuildSettings::new(
            Os::Linux,
            Arch::X86_64,
            Compiler::new(CompilerFamily::Gcc, "5"),
            BuildType::Release,
        );
        BuildContext::new(settings, BuildOptions::default(), root)
    }

    fn fake_build(ctx: &BuildContext) {
        let src = ctx.source_dir();
        fs::create_dir_all(src.join("boost/thread")).unwrap();
        fs::write(src.join("boost/version.hpp"), "").unwrap();
        fs::write(src.join("boost/thread/thread.hpp"), "").unwrap();

        let stage = ctx.stage_lib_dir();
        fs::create_dir_all(&stage).unwrap();
        fs::write(stage.join("libboost_thread.a"), "").unwrap();
        fs::write(stage.join("libboost_system.a"), "").unwrap();
        fs::write(stage.join("libboost_system.so"), "").unwrap();

        fs::write(ctx.recipe_dir.join("FindBoost.cmake"), "").unwrap();
        fs::write(ctx.recipe_dir.join("OriginalFindBoost.cmake"), "").unwrap();
    }

    #[test]
    fn test_package_layout() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path());
        fake_build(&ctx);

        let summary = package(&ctx).unwrap();
        let pkg = &ctx.package_dir;

        assert_eq!(summary.exports.len(), 2);
        assert!(pkg.join("FindBoost.cmake").exists());
        assert!(pkg.join("OriginalFindBoost.cmake").exists());

        assert_eq!(summary.header_count, 2);
        assert!(pkg.join("include/boost/thread/thread.hpp").exists());

        assert_eq!(summary.libs.len(), 2);
        assert!(pkg.join("lib/libboost_thread.a").exists());
        assert!(!pkg.join("lib/libboost_system.so").exists());

        assert_eq!(summary.missing.len(), 30);
        assert!(!summary.missing.contains(&"boost_thread".to_string()));

        let info: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(pkg.join(PACKAGE_INFO_FILE)).unwrap())
                .unwrap();
        let expected = PackageInfo::for_config(&ctx.settings, &ctx.options, &ctx.recipe).unwrap();
        assert_eq!(info["libs"].as_array().map(Vec::len), Some(expected.libs.len()));
    }

    #[test]
    fn test_package_without_build() {
        let tmp = TempDir::new().unwrap();
        let err = package(&context(tmp.path())).unwrap_err();
        assert!(err.to_string().contains("header directory"));
    }
}
