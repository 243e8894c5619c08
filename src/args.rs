use crate::world_editor::http::DEFAULT_HOST;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments parser
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Also mark the build area: a concrete outline and four labelled district poles (optional)
    #[arg(long)]
    pub dev: bool,

    /// Address of the GDMC HTTP interface
    #[arg(long, env = "GDMC_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Seed for a reproducible run; omit for a fresh layout every time (optional)
    #[arg(long, env = "CITADEL_SEED")]
    pub seed: Option<u64>,

    /// Where to write the top-down overview image
    #[arg(long, default_value = "tmp/overview.png")]
    pub overview: PathBuf,
}

/// Validates CLI arguments after parsing.
pub fn validate_args(args: &Args) -> Result<(), String> {
    if !(args.host.starts_with("http://") || args.host.starts_with("https://")) {
        return Err(format!(
            "The --host argument must be an http(s) URL, got: {}",
            args.host
        ));
    }
    if args.overview.as_os_str().is_empty() {
        return Err("The --overview argument must not be empty.".to_string());
    }
    Ok(())
}
