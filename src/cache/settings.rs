/// Settings for the cache.
///
/// # Examples
///
/// Create new settings, turning off member caching:
///
/// ```rust
/// use interaction_responder::cache::Settings as CacheSettings;
///
/// let mut settings = CacheSettings::default();
/// settings.cache_members = false;
/// ```
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Settings {
    /// Whether to keep users written back while hydrating interactions.
    ///
    /// Defaults to true.
    pub cache_users: bool,
    /// Whether to keep guild-bound members written back while hydrating interactions.
    ///
    /// Defaults to true.
    pub cache_members: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_users: true,
            cache_members: true,
        }
    }
}
