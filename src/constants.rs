//! A set of constants used by the library.

/// The base URI of the versioned REST API.
pub const API_BASE: &str = "https://discord.com/api/v10";

/// The [UserAgent] sent along with every request.
///
/// [UserAgent]: ::reqwest::header::USER_AGENT
pub const USER_AGENT: &str = concat!(
    "DiscordBot (",
    env!("CARGO_PKG_NAME"),
    ", ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// The message id accepted by the webhook endpoints in place of a real id, meaning "the initial
/// response of the interaction".
pub const ORIGINAL_MESSAGE: &str = "@original";
