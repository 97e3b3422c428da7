//! Shared constants for the generator
//!

/// Default OpenAI-compatible API base, requests are joined onto this.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1/";

/// Default image model
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Number of images requested per submission.
pub const IMAGE_COUNT: u8 = 1;

/// Square resolution requested from the provider.
pub const IMAGE_SIZE: &str = "1024x1024";

/// Quality tier requested from the provider.
pub const IMAGE_QUALITY: &str = "standard";

/// We always ask for a hosted URL so there's a source reference to show.
pub const IMAGE_RESPONSE_FORMAT: &str = "url";

/// Prefix of downloaded files, eg `mandala_20240101_120000.png`
pub const DOWNLOAD_PREFIX: &str = "mandala";

/// strftime pattern for the download timestamp
pub const DOWNLOAD_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Text of the download anchor
pub const DOWNLOAD_LINK_TEXT: &str = "Download Your Mandala";

/// Replaces the credential wherever it shows up in provider messages.
pub const REDACTED: &str = "[redacted]";

/// Length of CSRF session tokens
pub const CSRF_TOKEN_LENGTH: usize = 32;

/// Default inactivity window before a session (and its last result) is dropped.
pub const DEFAULT_SESSION_IDLE_MINUTES: u32 = 60;
/// Longest allowed idle window, one year
pub const MAX_SESSION_IDLE_MINUTES: u32 = 525_600;
