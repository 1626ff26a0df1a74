use std::error::Error as StdError;
use std::fmt;

#[cfg(feature = "http")]
use reqwest::Error as ReqwestError;
#[cfg(feature = "http")]
use reqwest::Response;
use serde::{Deserialize, Serialize};
use url::ParseError as UrlError;

use super::LightMethod;
use crate::internal::prelude::*;
#[cfg(feature = "http")]
use crate::json::decode_resp;

/// The error body Discord sends with an unsuccessful response.
///
/// [Discord docs](https://discord.com/developers/docs/reference#error-messages).
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[non_exhaustive]
pub struct DiscordJsonError {
    /// The error code.
    pub code: isize,
    /// The error message.
    pub message: String,
    /// The per-field errors, if any, exactly as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

/// An unsuccessful response of Discord, surfaced unchanged.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct ErrorResponse {
    pub status_code: u16,
    /// The requested URL, with the interaction token redacted.
    pub url: String,
    pub method: LightMethod,
    pub error: DiscordJsonError,
}

impl ErrorResponse {
    #[cfg(feature = "http")]
    pub(crate) async fn from_response(r: Response, method: LightMethod, url: String) -> Self {
        ErrorResponse {
            status_code: r.status().as_u16(),
            url,
            method,
            error: decode_resp(r).await.unwrap_or_else(|e| DiscordJsonError {
                code: -1,
                message: format!("Could not decode json when receiving error response: {e}"),
                errors: None,
            }),
        }
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum HttpError {
    /// When a non-successful status code was received for a request.
    UnsuccessfulRequest(ErrorResponse),
    /// Reqwest's Error contain information on why sending a request failed.
    #[cfg(feature = "http")]
    Request(ReqwestError),
    /// When parsing an URL failed due to invalid input.
    Url(UrlError),
}

impl HttpError {
    /// Returns true when the error is caused by an unsuccessful request
    #[must_use]
    pub fn is_unsuccessful_request(&self) -> bool {
        matches!(self, Self::UnsuccessfulRequest(_))
    }

    /// Returns the status code if the error is an unsuccessful request
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnsuccessfulRequest(res) => Some(res.status_code),
            _ => None,
        }
    }
}

#[cfg(feature = "http")]
impl From<ReqwestError> for HttpError {
    fn from(error: ReqwestError) -> HttpError {
        HttpError::Request(error)
    }
}

impl From<UrlError> for HttpError {
    fn from(error: UrlError) -> HttpError {
        HttpError::Url(error)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsuccessfulRequest(e) => f.write_str(&e.error.message),
            #[cfg(feature = "http")]
            Self::Request(_) => f.write_str("Error while sending HTTP request."),
            Self::Url(_) => f.write_str("Provided URL is incorrect."),
        }
    }
}

impl StdError for HttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::UnsuccessfulRequest(_) => None,
            #[cfg(feature = "http")]
            Self::Request(inner) => Some(inner),
            Self::Url(inner) => Some(inner),
        }
    }
}
