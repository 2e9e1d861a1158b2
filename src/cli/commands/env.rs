//! `check-env`: report on the external toolchain.

use crate::{
    bundler::builder::check_environment,
    cli::{CheckEnvArgs, RuntimeConfig},
    error::Result,
};

pub async fn check_env(args: CheckEnvArgs, config: &RuntimeConfig) -> Result<i32> {
    config.section("Checking environment")?;
    let reports = check_environment(args.bin.as_deref()).await;
    for report in &reports {
        config.indent(&report.to_string())?;
    }
    if reports.iter().all(|r| r.is_ok()) {
        config.success("All tools found")?;
    } else {
        config.warn("Some tools are missing or outdated; see above")?;
    }
    Ok(0)
}
