//! Bootstrap b2 and build the libraries.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::builder::b2::b2_program;
use crate::builder::BuildContext;
use crate::util::process::ProcessBuilder;

/// Log file the bootstrap script writes next to itself.
pub const BOOTSTRAP_LOG: &str = "bootstrap.log";

/// Run bootstrap, then b2, inside the extracted source folder.
pub fn build(ctx: &BuildContext) -> Result<()> {
    let source_dir = ctx.source_dir();
    if !source_dir.is_dir() {
        bail!(
            "source folder {} not found\n\
             help: Run `boostpkg source` first",
            source_dir.display()
        );
    }

    bootstrap(ctx)?;
    run_b2(ctx)
}

/// Run the bootstrap script. On failure the bootstrap log is printed before
/// the error is returned.
pub fn bootstrap(ctx: &BuildContext) -> Result<()> {
    let source_dir = ctx.source_dir();
    let bootstrap = ctx.bootstrap();

    tracing::info!("Bootstrapping: {}", bootstrap.display_command());

    let cmd = ProcessBuilder::new(source_dir.join(bootstrap.script))
        .args(&bootstrap.args)
        .cwd(&source_dir);

    if let Err(err) = cmd.run() {
        write_bootstrap_log(&source_dir, &mut io::stderr().lock());
        return Err(err.context("bootstrap failed"));
    }

    Ok(())
}

/// Copy `bootstrap.log` from the source folder to `out`.
fn write_bootstrap_log(source_dir: &Path, out: &mut impl Write) {
    let log_path = source_dir.join(BOOTSTRAP_LOG);
    match std::fs::read_to_string(&log_path) {
        Ok(log) => {
            if let Err(e) = writeln!(out, "{}", log) {
                tracing::warn!("could not print {}: {}", log_path.display(), e);
            }
        }
        Err(e) => tracing::warn!("could not read {}: {}", log_path.display(), e),
    }
}

/// Run b2 with the derived flags.
pub fn run_b2(ctx: &BuildContext) -> Result<()> {
    let source_dir = ctx.source_dir();

    tracing::warn!("{}", ctx.display_b2_command());

    ProcessBuilder::new(source_dir.join(b2_program(ctx.settings.os)))
        .args(ctx.b2_args())
        .cwd(&source_dir)
        .run()
        .context("b2 build failed")
}
