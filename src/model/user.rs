//! User information-related models.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Information about a user.
///
/// [Discord docs](https://discord.com/developers/docs/resources/user#user-object).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub struct User {
    /// The unique Id of the user. Can be used to calculate the account's creation date.
    pub id: UserId,
    /// The account's username.
    #[serde(rename = "username")]
    pub name: String,
    /// The account's legacy discriminator, `"0"` for migrated accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    /// The account's display name, if it is set. For bots this is the application name.
    #[serde(default)]
    pub global_name: Option<String>,
    /// Optional avatar hash.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Indicator of whether the user is a bot.
    #[serde(default)]
    pub bot: bool,
    /// Whether the user is an Official Discord System user (part of the urgent message system).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub system: bool,
    /// The public flags on a user's account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_flags: Option<u64>,
}

impl User {
    /// Returns the name shown in the client: the global name if one is set, otherwise the
    /// username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.name)
    }

    /// Returns the "tag" for the user.
    ///
    /// Migrated accounts have no discriminator, in which case this is the bare username.
    #[must_use]
    pub fn tag(&self) -> String {
        match self.discriminator.as_deref() {
            Some(discriminator) if discriminator != "0" => format!("{}#{discriminator}", self.name),
            _ => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::json;

    #[test]
    fn tag_and_display_name() {
        let legacy: User = serde_json::from_value(json!({
            "id": "1",
            "username": "test",
            "discriminator": "1432",
        }))
        .unwrap();
        assert_eq!(legacy.tag(), "test#1432");
        assert_eq!(legacy.display_name(), "test");

        let migrated: User = serde_json::from_value(json!({
            "id": "2",
            "username": "test",
            "discriminator": "0",
            "global_name": "Test Person",
        }))
        .unwrap();
        assert_eq!(migrated.tag(), "test");
        assert_eq!(migrated.display_name(), "Test Person");
    }
}
