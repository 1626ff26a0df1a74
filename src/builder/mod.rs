//! A set of builders for the bodies sent in reply to an interaction.
//!
//! These are used when not all parameters are required, all parameters are optional, and/or sane
//! default values for required parameters can be applied by a builder.

mod create_attachment;
mod create_embed;
mod create_interaction_response;
mod interaction_content;

pub use self::create_attachment::*;
pub use self::create_embed::*;
pub use self::create_interaction_response::*;
pub use self::interaction_content::*;
