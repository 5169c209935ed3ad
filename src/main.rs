use coral_list::cli::Cli;
use coral_list::config::Config;
use coral_list::error::Result;
use coral_list::shell::{run_session, Handler};
use coral_list::telemetry::init_telemetry;
use coral_list::SharedListStore;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_sources(&cli)?;
    let _telemetry = init_telemetry(&config.telemetry);

    let store = Arc::new(SharedListStore::with_policy(config.store.empty_lists));
    let handler = Handler::new(store);

    match &cli.script {
        Some(path) => {
            info!("Running script {}", path.display());
            let file = tokio::fs::File::open(path).await?;
            run_session(&handler, BufReader::new(file), tokio::io::stdout()).await?;
            Ok(())
        }
        None => {
            info!("Reading commands from stdin (empty lists: {:?})", config.store.empty_lists);
            run_session(&handler, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
            Ok(())
        }
    }
}
