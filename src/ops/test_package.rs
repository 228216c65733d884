//! Build and run a small consumer against the packaged output.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::builder::BuildContext;
use crate::util::fs::{ensure_dir, read_to_string};
use crate::util::process::{find_cmake, ProcessBuilder};

/// Default package user when `CONAN_USERNAME` is unset.
pub const DEFAULT_USER: &str = "tleach";

/// Default package channel when `CONAN_CHANNEL` is unset.
pub const DEFAULT_CHANNEL: &str = "testing";

/// Consumer executable built by the test project.
const TEST_EXECUTABLE: &str = "lambda";

/// Input fed to the consumer on stdin.
const TEST_INPUT: &str = "data.txt";

/// `name/version@user/channel`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReference {
    pub name: String,
    pub version: String,
    pub user: String,
    pub channel: String,
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}/{}", self.name, self.version, self.user, self.channel)
    }
}

/// Inputs for a test-package run.
#[derive(Debug, Clone)]
pub struct TestPackageOptions {
    /// Directory with CMakeLists.txt, the consumer source and data.txt
    pub test_dir: PathBuf,
    /// CMake build directory
    pub build_dir: PathBuf,
    pub user: String,
    pub channel: String,
}

impl TestPackageOptions {
    pub fn new(test_dir: PathBuf, build_dir: PathBuf) -> Self {
        TestPackageOptions {
            test_dir,
            build_dir,
            user: DEFAULT_USER.to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
        }
    }

    pub fn reference(&self, ctx: &BuildContext) -> PackageReference {
        PackageReference {
            name: ctx.recipe.name.to_string(),
            version: ctx.recipe.version.to_string(),
            user: self.user.clone(),
            channel: self.channel.clone(),
        }
    }
}

/// Configure, build and run the consumer. Success is the consumer's exit status.
pub fn test_package(ctx: &BuildContext, opts: &TestPackageOptions) -> Result<String> {
    let reference = opts.reference(ctx);
    tracing::info!("Testing {}", reference);

    if !ctx.package_dir.join("include").is_dir() {
        bail!(
            "package {} not found at {}\n\
             help: Run `boostpkg create` first",
            reference,
            ctx.package_dir.display()
        );
    }

    let cmake = find_cmake().context(
        "CMake not found\n\
         \n\
         CMake is required to build the test package.\n\
         Install CMake and ensure it's in your PATH.",
    )?;

    ensure_dir(&opts.build_dir)?;

    ProcessBuilder::new(&cmake)
        .arg(&opts.test_dir)
        .args(configure_args(ctx)?)
        .cwd(&opts.build_dir)
        .run()
        .context("test package configuration failed")?;

    ProcessBuilder::new(&cmake)
        .args(["--build", ".", "--config", ctx.settings.build_type.as_str()])
        .cwd(&opts.build_dir)
        .run()
        .context("test package build failed")?;

    let input = read_to_string(&opts.test_dir.join(TEST_INPUT))?;
    let output = ProcessBuilder::new(executable_path(&opts.build_dir, ctx))
        .stdin(input)
        .cwd(opts.build_dir.join("bin"))
        .exec_and_check()
        .context("test package executable failed")?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    tracing::info!("{} output: {}", TEST_EXECUTABLE, stdout.trim());
    Ok(stdout)
}

fn configure_args(ctx: &BuildContext) -> Result<Vec<String>> {
    let info = ctx.package_info()?;
    let naming = ctx.naming()?;

    // Declared libraries that were actually packaged, in link order.
    let lib_dir = ctx.package_dir.join("lib");
    let libs: Vec<&str> = info
        .libs
        .iter()
        .filter(|lib| lib_dir.join(naming.file_name(lib)).is_file())
        .map(String::as_str)
        .collect();

    Ok(vec![
        format!("-DCMAKE_BUILD_TYPE={}", ctx.settings.build_type),
        format!("-DBOOST_ROOT={}", ctx.package_dir.display()),
        format!("-DBOOSTPKG_DEFINES={}", info.defines.join(";")),
        format!("-DBOOSTPKG_LIB_DIRS={}", info.lib_dirs.join(";")),
        format!("-DBOOSTPKG_LIBS={}", libs.join(";")),
    ])
}

fn executable_path(build_dir: &Path, ctx: &BuildContext) -> PathBuf {
    let name = if ctx.settings.os.is_windows() {
        format!("{}.exe", TEST_EXECUTABLE)
    } else {
        TEST_EXECUTABLE.to_string()
    };
    build_dir.join("bin").join(name)
}
