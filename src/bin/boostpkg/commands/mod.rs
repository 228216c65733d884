//! Command implementations

pub mod build;
pub mod completions;
pub mod create;
pub mod flags;
pub mod info;
pub mod libs;
pub mod package;
pub mod source;
pub mod test;

use anyhow::Result;

use crate::cli::{ConfigArgs, SourceFlags};
use boostpkg::ops::SourceOptions;
use boostpkg::util::GlobalContext;
use boostpkg::BuildContext;

/// Resolve the build context for the current directory.
///
/// Settings and options: config files first, then `-s`/`-o` pairs.
/// Jobs and directories: CLI > config > defaults.
pub(crate) fn load_context(args: &ConfigArgs) -> Result<BuildContext> {
    let gctx = GlobalContext::new()?;
    let config = gctx.load_config();

    let mut ctx = BuildContext::from_config(&config, &args.settings, &args.options, gctx.cwd())?;
    if let Some(ref dir) = args.work_dir {
        ctx = ctx.with_work_dir(gctx.cwd().join(dir));
    }
    if let Some(ref dir) = args.package_dir {
        ctx = ctx.with_package_dir(gctx.cwd().join(dir));
    }
    if let Some(jobs) = args.jobs {
        ctx = ctx.with_jobs(jobs);
    }

    tracing::debug!("settings: {}", ctx.settings.to_pairs().join(" "));
    tracing::debug!("options: {}", ctx.options.to_pairs().join(" "));
    Ok(ctx)
}

impl From<SourceFlags> for SourceOptions {
    fn from(flags: SourceFlags) -> Self {
        SourceOptions {
            force: flags.force,
            archive: flags.archive,
        }
    }
}
