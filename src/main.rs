use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use joint_dropout::Config;

#[derive(Parser)]
#[command(name = "joint-dropout")]
#[command(about = "Replace aligned phrase pairs with shared variables", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(default_value = "config.json")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    info!(
        "vardrop={} max_vocab={} seed={}",
        config.vardrop, config.max_vocab, config.seed
    );

    joint_dropout::run(&config).context("joint dropout failed")?;

    Ok(())
}
