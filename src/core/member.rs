use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a member participating in shared expenses.
///
/// The engine treats members as opaque keys: anything with a stable
/// identifier (a user id, an email, a nickname) works. Members have no
/// lifecycle of their own here — they appear as payers, split holders,
/// or payment counterparties.
///
/// # Examples
///
/// ```
/// use split_engine::core::member::MemberId;
///
/// let alice = MemberId::new("alice");
/// let bob = MemberId::new("bob");
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Create a new member identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this member ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
