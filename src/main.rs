use std::sync::Arc;

use clap::Parser;

mod cli;
mod config;
mod errors;
mod excel;
mod fetch;
mod generate;
mod prompt;
mod provider;
mod web;
mod wire;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let mut cfg = config::Config::from_env();
    if let Some(model) = args.model {
        cfg.model = model;
    }
    if let Some(port) = args.port {
        cfg.port = port;
    }

    let generator = generate::TestCaseGenerator::new(&cfg)?;

    match args.url {
        Some(url) => {
            let url = url.trim();
            let cases = generator.generate(url, args.context.trim()).await?;
            let bytes = excel::build_workbook(url, &cases)?;
            fs_err::write(&args.out, &bytes)?;
            tracing::info!(cases = cases.len(), out = %args.out, "workbook written");
        }
        None => {
            let state = Arc::new(web::AppState { generator });
            web::serve(cfg.port, state).await?;
        }
    }

    Ok(())
}
