//! Text conversion commands: `to-rtf` and `to-windows`.

use crate::{
    bundler::utils::rtf,
    cli::{ConvertArgs, RuntimeConfig},
    error::Result,
};

pub async fn to_rtf(args: ConvertArgs, config: &RuntimeConfig) -> Result<i32> {
    rtf::write_as_rtf(&args.src, &args.out, args.reencode).await?;
    config.success(&format!("Wrote {}", args.out.display()))?;
    Ok(0)
}

pub async fn to_windows(args: ConvertArgs, config: &RuntimeConfig) -> Result<i32> {
    rtf::write_as_windows1252(&args.src, &args.out).await?;
    config.success(&format!("Wrote {}", args.out.display()))?;
    Ok(0)
}
