//! Models about application commands and the interactions that invoke them.

mod command;
pub use command::*;
mod command_interaction;
pub use command_interaction::*;
mod interaction;
pub use interaction::*;
