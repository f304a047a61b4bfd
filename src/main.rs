use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adjacent_site::bootstrap;
use adjacent_site::cli::{Cli, Commands};
use adjacent_site::config::Config;
use adjacent_site::fetcher::Fetcher;
use adjacent_site::render::StaticPage;
use adjacent_site::theme::{self, FileStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout carries the rendered page
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adjacent_site=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let store_path = cli.prefs.clone().unwrap_or_else(|| config.theme.store_path.clone());
    let mut store = FileStore::new(&store_path);
    let mut page = StaticPage::new();

    match cli.command.unwrap_or(Commands::Render { output: None }) {
        Commands::Render { output } => {
            let fetcher = Fetcher::new(&config.feed)?;
            info!("Loading recent posts from {}", fetcher.feed_url());

            let (theme, outcome) =
                bootstrap::run(&store, &mut page, &fetcher, cli.prefers_dark).await?;
            info!("Rendered page with {} theme ({:?})", theme.as_str(), outcome);

            let html = page.to_html()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    info!("Wrote {}", path.display());
                }
                None => println!("{}", html),
            }
        }
        Commands::ToggleTheme => {
            theme::initialize(&store, &mut page, cli.prefers_dark)?;
            let theme = theme::toggle(&mut store, &mut page)?;
            info!("Theme saved to {}", store_path.display());
            println!("{}", theme.as_str());
        }
    }

    Ok(())
}
