#[path = "content-eval/args.rs"]
mod args;
#[path = "content-eval/items.rs"]
mod items;
#[path = "content-eval/logging.rs"]
mod logging;
#[path = "content-eval/run.rs"]
mod run;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run::run(args::CliArgs::parse()).await
}
