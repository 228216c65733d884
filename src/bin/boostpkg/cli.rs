//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use boostpkg::ops::test_package::{DEFAULT_CHANNEL, DEFAULT_USER};

/// boostpkg - fetch, build and package Boost
#[derive(Parser)]
#[command(name = "boostpkg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the bootstrap command and b2 flags for a configuration
    Flags(FlagsArgs),

    /// List the library names declared to consumers
    Libs(LibsArgs),

    /// Show the package info (libraries and defines) for consumers
    Info(InfoArgs),

    /// Download and extract the source archive
    Source(SourceArgs),

    /// Bootstrap and run b2 in the extracted source folder
    Build(BuildArgs),

    /// Copy headers and libraries into the package layout
    Package(PackageArgs),

    /// Run source, build and package in sequence
    Create(CreateArgs),

    /// Build and run the test consumer against the package
    Test(TestArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Settings and options shared by every recipe command.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Setting as key=value (e.g. `-s compiler=gcc -s build_type=Debug`)
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Option as key=value (e.g. `-o shared=True`)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Directory the source archive is extracted into
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Package output directory
    #[arg(long)]
    pub package_dir: Option<PathBuf>,

    /// Number of parallel b2 jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct FlagsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print one b2 flag per line
    #[arg(long)]
    pub list: bool,
}

#[derive(Args)]
pub struct LibsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print only the library file-name suffix (Visual Studio)
    #[arg(long)]
    pub suffix: bool,
}

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SourceArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub source: SourceFlags,
}

/// Source step flags.
#[derive(Args, Debug, Clone)]
pub struct SourceFlags {
    /// Re-extract even if the source folder exists
    #[arg(long)]
    pub force: bool,

    /// Extract a local archive instead of downloading
    #[arg(long, value_name = "PATH")]
    pub archive: Option<PathBuf>,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args)]
pub struct PackageArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub source: SourceFlags,
}

#[derive(Args)]
pub struct TestArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Test project directory
    #[arg(long, default_value = "test_package")]
    pub test_dir: PathBuf,

    /// CMake build directory (defaults to <work-dir>/test_package)
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Package user
    #[arg(long, env = "CONAN_USERNAME", default_value = DEFAULT_USER)]
    pub user: String,

    /// Package channel
    #[arg(long, env = "CONAN_CHANNEL", default_value = DEFAULT_CHANNEL)]
    pub channel: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
