//! Mappings of objects received from the API, with helper methods for ease of use.
//!
//! Objects carried by an interaction are first received as their raw payload (for example
//! [`RawCommandInteraction`]) and then hydrated by the [`Resolver`] into their shared, guild-bound
//! form (for example [`CommandInteraction`]).
//!
//! [`RawCommandInteraction`]: application::RawCommandInteraction
//! [`CommandInteraction`]: application::CommandInteraction
//! [`Resolver`]: crate::resolver::Resolver

pub mod application;
pub mod channel;
pub mod guild;
pub mod id;
pub mod permissions;
pub mod prelude;
pub mod user;

pub use self::permissions::Permissions;
