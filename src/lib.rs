//! Interaction Responder replies to Discord application command interactions.
//!
//! A command interaction arrives as a JSON payload carrying a `resolved` block: the users,
//! members, roles, channels, messages and attachments its options refer to. The [`Resolver`]
//! hydrates that payload into a [`CommandInteraction`], writing users and members back to an
//! [`EntityCache`] so every interaction shares the same records.
//!
//! Each interaction then gets an [`InteractionResponder`], which enforces Discord's response
//! lifecycle: one initial response, either deferred or with a message, followed by any number of
//! followup messages sent through the application's webhook. Requests are issued through the
//! [`InteractionHttp`] trait, implemented by [`Http`] with the `http` feature.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use interaction_responder::cache::Cache;
//! use interaction_responder::http::Http;
//! use interaction_responder::json::Value;
//! use interaction_responder::resolver::Resolver;
//!
//! # async fn run(payload: Value) -> interaction_responder::Result<()> {
//! let resolver = Resolver::with_cache(Arc::new(Cache::new()));
//! let http = Arc::new(Http::new()?);
//!
//! let interaction = resolver.hydrate_value(payload)?;
//! let mut responder = interaction.responder(http);
//! responder.respond_with_message("Pong!").await?;
//! # Ok(())
//! # }
//! ```
//!
//! Note that, although this documentation will try to be as up-to-date and accurate as possible,
//! Discord hosts [official documentation][docs]. If you need to be sure that some information
//! piece is sanctioned by Discord, refer to their own documentation.
//!
//! [`CommandInteraction`]: crate::model::application::CommandInteraction
//! [`EntityCache`]: crate::cache::EntityCache
//! [`Http`]: crate::http::Http
//! [`InteractionHttp`]: crate::http::InteractionHttp
//! [`InteractionResponder`]: crate::responder::InteractionResponder
//! [`Resolver`]: crate::resolver::Resolver
//! [docs]: https://discord.com/developers/docs/interactions/receiving-and-responding
#![doc(html_root_url = "https://docs.rs/interaction_responder/*")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(
    unused,
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::clone_on_ref_ptr,
    clippy::non_ascii_literal,
    clippy::fallible_impl_from,
    clippy::let_underscore_must_use,
    clippy::format_push_string,
    clippy::pedantic
)]
#![allow(
    // Allowed as they are too pedantic
    clippy::cast_possible_truncation,
    clippy::module_name_repetitions,
    clippy::unreadable_literal,
    clippy::cast_possible_wrap,
    clippy::wildcard_imports,
    clippy::cast_sign_loss,
    clippy::too_many_lines,
    clippy::doc_markdown,
    clippy::missing_panics_doc,
    clippy::doc_link_with_quotes
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[macro_use]
mod internal;

pub mod builder;
pub mod cache;
pub mod constants;
pub mod http;
pub mod json;
pub mod model;
pub mod prelude;
pub mod resolver;
pub mod responder;

mod error;

pub use crate::error::{EntityKind, Error, InteractionError, PayloadShapeError, Result};

// Re-exports of crates used internally which are already publically exposed.
pub use async_trait::async_trait;
pub use secrecy;
