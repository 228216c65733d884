//! Build context - settings, options, and the directories a run works in.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::b2::{self, Bootstrap, FlagSet};
use crate::builder::naming::LibraryNaming;
use crate::builder::package_info::PackageInfo;
use crate::core::options::BuildOptions;
use crate::core::recipe::{Recipe, DEFAULT_SOURCE_URL};
use crate::core::settings::BuildSettings;
use crate::util::config::Config;

/// Everything a recipe step needs to know about the current run.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub recipe: Recipe,

    pub settings: BuildSettings,

    /// Options after configure-time normalization
    pub options: BuildOptions,

    /// Directory holding the recipe's exported files (FindBoost.cmake, ...)
    pub recipe_dir: PathBuf,

    /// Directory the source archive is extracted into
    pub work_dir: PathBuf,

    /// Package output directory
    pub package_dir: PathBuf,

    /// Source URL template
    pub source_url: String,

    /// Expected SHA-256 of the source archive, if pinned
    pub source_sha256: Option<String>,

    /// Number of parallel b2 jobs
    pub jobs: usize,
}

impl BuildContext {
    /// Create a context rooted at `root`, with work and package directories below it.
    pub fn new(settings: BuildSettings, options: BuildOptions, root: &Path) -> Self {
        let options = options.normalized(&settings);
        BuildContext {
            recipe: Recipe::boost(),
            settings,
            options,
            recipe_dir: root.to_path_buf(),
            work_dir: root.join("build"),
            package_dir: root.join("package"),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            source_sha256: None,
            jobs: num_cpus::get(),
        }
    }

    /// Create a context from merged configuration plus command-line pairs.
    ///
    /// Command-line pairs are applied after the configured ones.
    pub fn from_config(
        config: &Config,
        setting_pairs: &[String],
        option_pairs: &[String],
        root: &Path,
    ) -> Result<Self> {
        let settings = BuildSettings::from_pairs(config.setting_pairs().chain(setting_pairs.iter().cloned()))?;
        let options = BuildOptions::from_pairs(config.option_pairs().chain(option_pairs.iter().cloned()))?;

        let mut ctx = BuildContext::new(settings, options, root);
        if let Some(ref url) = config.source.url {
            ctx.source_url = url.clone();
        }
        ctx.source_sha256 = config.source.sha256.clone();
        if let Some(jobs) = config.build.jobs {
            ctx = ctx.with_jobs(jobs);
        }
        if let Some(ref dir) = config.build.work_dir {
            ctx.work_dir = root.join(dir);
        }
        if let Some(ref dir) = config.build.package_dir {
            ctx.package_dir = root.join(dir);
        }
        Ok(ctx)
    }

    pub fn with_work_dir(mut self, dir: PathBuf) -> Self {
        self.work_dir = dir;
        self
    }

    pub fn with_package_dir(mut self, dir: PathBuf) -> Self {
        self.package_dir = dir;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Extracted source tree (`<work>/boost_1_63_0`).
    pub fn source_dir(&self) -> PathBuf {
        self.work_dir.join(self.recipe.folder_name())
    }

    /// Where b2 stages built libraries.
    pub fn stage_lib_dir(&self) -> PathBuf {
        self.source_dir().join("stage").join("lib")
    }

    pub fn flags(&self) -> FlagSet {
        b2::derive_flags(&self.settings, &self.options)
    }

    pub fn bootstrap(&self) -> Bootstrap {
        Bootstrap::for_settings(&self.settings)
    }

    pub fn b2_args(&self) -> Vec<String> {
        b2::b2_args(&self.settings, &self.options, self.jobs)
    }

    pub fn naming(&self) -> Result<LibraryNaming> {
        Ok(LibraryNaming::for_config(&self.settings, &self.options, &self.recipe)?)
    }

    pub fn package_info(&self) -> Result<PackageInfo> {
        Ok(PackageInfo::for_config(&self.settings, &self.options, &self.recipe)?)
    }

    /// The b2 command line as it would be typed in the source folder.
    pub fn display_b2_command(&self) -> String {
        let program = if self.settings.os.is_windows() {
            "b2"
        } else {
            "./b2"
        };
        format!(
            "{} {} -j{} {}",
            program,
            self.flags(),
            self.jobs,
            b2::FIXED_B2_ARGS.join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::{Arch, BuildType, Compiler, CompilerFamily, MsvcRuntime, Os};

    #[test]
    fn test_paths() {
        let ctx = BuildContext::new(
            BuildSettings::host(),
            BuildOptions::default(),
            Path::new("/tmp/recipe"),
        );
        assert_eq!(ctx.source_dir(), PathBuf::from("/tmp/recipe/build/boost_1_63_0"));
        assert_eq!(
            ctx.stage_lib_dir(),
            PathBuf::from("/tmp/recipe/build/boost_1_63_0/stage/lib")
        );
        assert_eq!(ctx.package_dir, PathBuf::from("/tmp/recipe/package"));
    }

    #[test]
    fn test_options_are_normalized() {
        let settings = BuildSettings::new(
            Os::Windows,
            Arch::X86_64,
            Compiler::new(CompilerFamily::VisualStudio, "14").with_runtime(MsvcRuntime::Mt),
            BuildType::Release,
        );
        let options = BuildOptions {
            fpic: Some(true),
            shared: true,
        };
        let ctx = BuildContext::new(settings, options, Path::new("."));
        assert!(!ctx.options.shared);
        assert_eq!(ctx.options.fpic, None);
    }

    #[test]
    fn test_display_b2_command() {
        let settings = BuildSettings::new(
            Os::Linux,
            Arch::X86_64,
            Compiler::new(CompilerFamily::Gcc, "5"),
            BuildType::Release,
        );
        let ctx = BuildContext::new(settings, BuildOptions::default(), Path::new(".")).with_jobs(4);
        assert_eq!(
            ctx.display_b2_command(),
            "./b2 toolset=gcc link=static variant=release address-model=64 cxxflags=\"-fPIC\" -j4 --abbreviate-paths --without-python"
        );
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.settings.insert("os".into(), "Linux".into());
        config.settings.insert("compiler".into(), "gcc".into());
        config.options.insert("shared".into(), "True".into());
        config.build.jobs = Some(3);

        let ctx = BuildContext::from_config(
            &config,
            &["build_type=Debug".to_string()],
            &["fPIC=False".to_string()],
            Path::new("/r"),
        )
        .unwrap();

        assert_eq!(ctx.settings.build_type, BuildType::Debug);
        assert!(ctx.options.shared);
        assert_eq!(ctx.options.fpic, Some(false));
        assert_eq!(ctx.jobs, 3);
    }

    #[test]
    fn test_configured_zero_jobs_is_clamped() {
        let config: Config = toml::from_str("[build]\njobs = 0\n").unwrap();
        let ctx = BuildContext::from_config(&config, &[], &[], Path::new("/r")).unwrap();

        assert_eq!(ctx.jobs, 1);
        assert!(ctx.b2_args().contains(&"-j1".to_string()));
        assert!(!ctx.b2_args().contains(&"-j0".to_string()));
    }
}
