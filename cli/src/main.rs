use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

mod args;
mod commands;
mod validators;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the JSON record, so logs go to stderr
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if args.log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    commands::run(args).await
}
