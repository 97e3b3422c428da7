//! Config handling

use tracing::log::LevelFilter;
use url::Url;

use crate::cli::CliOptions;

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("tracing", LevelFilter::Warn)
            .with_module_level("rustls", LevelFilter::Info)
            .with_module_level("hyper_util", LevelFilter::Info)
            .with_module_level("reqwest", LevelFilter::Info)
            .with_module_level("tower_sessions", LevelFilter::Warn)
            .with_module_level("h2", LevelFilter::Info);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

/// Where and how to talk to the image generation provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    /// API base, always ends in `/` so endpoints can be joined onto it.
    pub api_base: Url,
    /// Image model name sent with each request.
    pub image_model: String,
}

impl ProviderConfig {
    /// Builds a config, normalizing the base so it ends in a slash.
    pub fn new(api_base: &str, image_model: &str) -> Result<Self, url::ParseError> {
        let mut api_base = Url::parse(api_base.trim())?;
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }
        Ok(Self {
            api_base,
            image_model: image_model.trim().to_string(),
        })
    }

    /// The image generation endpoint.
    pub fn generations_url(&self) -> Result<Url, url::ParseError> {
        self.api_base.join("images/generations")
    }
}

impl TryFrom<&CliOptions> for ProviderConfig {
    type Error = url::ParseError;

    fn try_from(cli: &CliOptions) -> Result<Self, Self::Error> {
        Self::new(&cli.api_base, &cli.image_model)
    }
}
