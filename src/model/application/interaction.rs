enum_number! {
    /// The type of an Interaction.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-interaction-type).
    pub enum InteractionType {
        Ping = 1,
        Command = 2,
        Component = 3,
        Autocomplete = 4,
        Modal = 5,
        _ => Unknown(u8),
    }
}

enum_number! {
    /// The type of an initial interaction response.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object-interaction-callback-type).
    pub enum InteractionResponseType {
        /// Acknowledges a ping.
        Pong = 1,
        /// Responds to an interaction with a message.
        ChannelMessageWithSource = 4,
        /// Acknowledges an interaction and edits a response later, the user sees a loading
        /// state.
        DeferredChannelMessageWithSource = 5,
        /// For components only: acknowledges an interaction and edits the original message
        /// later; the user does not see a loading state.
        DeferredUpdateMessage = 6,
        /// For components only: edits the message the component was attached to.
        UpdateMessage = 7,
        /// Responds to an autocomplete interaction with suggested choices.
        Autocomplete = 8,
        /// Responds to an interaction with a popup modal.
        Modal = 9,
        _ => Unknown(u8),
    }
}
