//! Group link validation.

use std::sync::LazyLock;

use regex::Regex;

// Anchored at the start only: anything after the group name is accepted.
static PORTAL_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(t\.me|telegram\.me)/[A-Za-z0-9_]+")
        .expect("valid portal link regex")
});


/// A link that passed [`validate_portal_link`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalLink(String);

impl PortalLink {
    pub fn into_inner(self) -> String {
        self.0
    }
}


#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a Telegram portal or group link: {0:?}")]
pub struct InvalidPortalLink(pub String);


/// Checks that `text` looks like a `t.me` / `telegram.me` group link.
///
/// The text is kept exactly as typed.
pub fn validate_portal_link(text: &str) -> Result<PortalLink, InvalidPortalLink> {
    if PORTAL_LINK_RE.is_match(text) {
        Ok(PortalLink(text.to_string()))
    } else {
        Err(InvalidPortalLink(text.to_string()))
    }
}
