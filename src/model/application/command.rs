enum_number! {
    /// The type of an application command.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/application-commands#application-command-object-application-command-types).
    pub enum CommandType {
        /// A slash command, typed in the chat input.
        ChatInput = 1,
        /// A context menu command invoked on a user.
        User = 2,
        /// A context menu command invoked on a message.
        Message = 3,
        _ => Unknown(u8),
    }
}

enum_number! {
    /// The type of a command option.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/application-commands#application-command-object-application-command-option-type).
    pub enum CommandOptionType {
        SubCommand = 1,
        SubCommandGroup = 2,
        String = 3,
        Integer = 4,
        Boolean = 5,
        User = 6,
        Channel = 7,
        Role = 8,
        Mentionable = 9,
        Number = 10,
        Attachment = 11,
        _ => Unknown(u8),
    }
}

impl CommandOptionType {
    /// Whether options of this type nest further options instead of carrying a value.
    #[must_use]
    pub fn is_group(self) -> bool {
        matches!(self, Self::SubCommand | Self::SubCommandGroup)
    }
}
