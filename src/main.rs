use anyhow::Result;
use clap::Parser;
use pingscope::cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = cli::Cli::parse();
    cli::run(args).await
}
