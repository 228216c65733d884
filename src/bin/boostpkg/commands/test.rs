//! `boostpkg test` command

use anyhow::Result;

use crate::cli::TestArgs;
use boostpkg::ops::{test_package, TestPackageOptions};

pub fn execute(args: TestArgs) -> Result<()> {
    let ctx = super::load_context(&args.config)?;

    let cwd = std::env::current_dir()?;
    let test_dir = cwd.join(&args.test_dir);
    let build_dir = match args.build_dir {
        Some(dir) => cwd.join(dir),
        None => ctx.work_dir.join("test_package"),
    };

    let mut opts = TestPackageOptions::new(test_dir, build_dir);
    opts.user = args.user;
    opts.channel = args.channel;

    test_package(&ctx, &opts)?;
    println!("Test package {} passed", opts.reference(&ctx));
    Ok(())
}
