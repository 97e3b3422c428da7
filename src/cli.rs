//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;

use crate::constants::{
    DEFAULT_API_BASE, DEFAULT_IMAGE_MODEL, DEFAULT_SESSION_IDLE_MINUTES, MAX_SESSION_IDLE_MINUTES,
};

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "MANDALA_DEBUG")]
    /// Enable debug logging. Env: MANDALA_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "8501", env = "MANDALA_PORT")]
    /// http listener, defaults to `8501`.
    /// Env: MANDALA_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "MANDALA_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: MANDALA_LISTEN_ADDRESS
    pub listen_address: String,
    #[clap(long, default_value = DEFAULT_API_BASE, env = "MANDALA_API_BASE")]
    /// Base URL of the image generation API.
    /// Env: MANDALA_API_BASE
    pub api_base: String,
    #[clap(long, default_value = DEFAULT_IMAGE_MODEL, env = "MANDALA_IMAGE_MODEL")]
    /// Image model to request, defaults to `dall-e-3`.
    /// Env: MANDALA_IMAGE_MODEL
    pub image_model: String,
    #[clap(
        long,
        default_value_t = DEFAULT_SESSION_IDLE_MINUTES,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_SESSION_IDLE_MINUTES)),
        env = "MANDALA_SESSION_IDLE_MINUTES"
    )]
    /// Minutes of inactivity before a session is forgotten, at most a year.
    /// Env: MANDALA_SESSION_IDLE_MINUTES
    pub session_idle_minutes: u32,
}
