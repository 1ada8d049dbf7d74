use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use marketmaestro::cli::{Cli, Command};
use marketmaestro::commands::{self, Output};
use marketmaestro::config::MaestroConfig;
use marketmaestro::runner::Pacing;
use marketmaestro::shell::App;
use marketmaestro::source::candidate_from_path;
use marketmaestro::ui::Renderer;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = MaestroConfig::load(cli.config.as_deref())?;
    let catalog = config.catalog()?;
    let mut app = App::new(&config, catalog);
    let renderer = Renderer::default();
    let out = Output {
        pacing: Pacing::from_flag(cli.realtime),
        json: cli.json,
    };

    app.login();
    match cli.command {
        Command::Demo => commands::demo(&mut app, &renderer, out).await?,
        Command::Upload { paths } => {
            let candidates = paths
                .iter()
                .map(|p| candidate_from_path(p))
                .collect::<Result<Vec<_>, _>>()?;
            commands::upload_and_summarize(&mut app, &renderer, &candidates, out).await?;
        }
        Command::Chat { query, suggestion } => {
            commands::ask(&mut app, &renderer, query.as_deref(), suggestion, out).await?;
        }
    }
    Ok(())
}
