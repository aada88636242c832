use anyhow::Result;
use clap::Parser;
use contrib_readme::cli::{self, AppContext, Cli};
use contrib_readme::github::GitHubClient;
use contrib_readme::logger;
use contrib_readme::readme::ReadmeGenerator;
use contrib_readme::store::ProfileStore;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli::load_config(&cli)?;
    logger::init(config.logging.enabled)?;

    let store = ProfileStore::from_config(&config)?;
    let catalog = cli::build_catalog(&config, &store.load())?;
    let client = GitHubClient::from_config(&config.api)?;

    let mut ctx = AppContext {
        generator: ReadmeGenerator::new(client),
        store,
        catalog,
    };

    let mut stdout = std::io::stdout().lock();
    cli::execute(cli.command, &mut ctx, &mut stdout).await
}
