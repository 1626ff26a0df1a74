//! A set of exports which can be helpful to use.
//!
//! Note that the `ResponderError` re-export is equivalent to [`interaction_responder::Error`],
//! although is re-exported as a separate name to remove likely ambiguity with other crate error
//! enums.
//!
//! # Examples
//!
//! Import all of the exports:
//!
//! ```rust
//! use interaction_responder::prelude::*;
//! ```
//!
//! [`interaction_responder::Error`]: crate::Error

pub use crate::builder::{CreateEmbed, InteractionContent};
#[cfg(feature = "cache")]
pub use crate::cache::Cache;
pub use crate::error::{Error as ResponderError, InteractionError};
#[cfg(feature = "http")]
pub use crate::http::Http;
pub use crate::http::{HttpError, InteractionHttp, MessageTarget};
pub use crate::resolver::Resolver;
pub use crate::responder::{AcknowledgementState, InteractionResponder, ResponsePath};
