use clap::Parser;
use mandala::config::{ProviderConfig, setup_logging};
use tracing::error;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = mandala::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return;
    }

    let provider = match ProviderConfig::try_from(&cli) {
        Ok(provider) => provider,
        Err(err) => {
            error!("Invalid API base {:?}: {}", cli.api_base, err);
            return;
        }
    };

    if let Err(err) = mandala::web::setup_server(
        &cli.listen_address,
        cli.port,
        provider,
        cli.session_idle_minutes,
    )
    .await
    {
        error!("Application error: {}", err);
    }
}
