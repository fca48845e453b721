use clap::Parser;
use tracing_subscriber::EnvFilter;

use spylinq::api::GameApi;
use spylinq::cli::{Args, Command};
use spylinq::error::ClientError;
use spylinq::{app, panel, view};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        view::print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ClientError> {
    let config = args.resolve_config()?;
    match args.command {
        Some(Command::Debug { action }) => {
            let api = GameApi::new(&config)?;
            panel::run(&api, &action).await
        }
        Some(Command::Play { name }) => app::run(&config, name).await,
        None => app::run(&config, None).await,
    }
}
