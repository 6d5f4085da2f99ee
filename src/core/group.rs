use crate::core::member::MemberId;
use crate::core::money::CurrencyCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Unique identifier for an expense-sharing group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A group of members sharing expenses.
///
/// The roster is the official member list: everyone on it gets a balance
/// entry even with no activity. The currency tag labels amounts for
/// display; all amounts in one group are assumed to share it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    name: String,
    members: BTreeSet<MemberId>,
    currency: CurrencyCode,
    created_at: DateTime<Utc>,
    notes: Option<String>,
}

impl Group {
    pub fn new(id: GroupId, name: impl Into<String>, currency: CurrencyCode) -> Self {
        Self {
            id,
            name: name.into(),
            members: BTreeSet::new(),
            currency,
            created_at: Utc::now(),
            notes: None,
        }
    }

    /// Add a member to the roster (idempotent).
    pub fn with_member(mut self, member: MemberId) -> Self {
        self.members.insert(member);
        self
    }

    /// Add several members to the roster.
    pub fn with_members<I: IntoIterator<Item = MemberId>>(mut self, members: I) -> Self {
        self.members.extend(members);
        self
    }

    /// Attach free-form notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &BTreeSet<MemberId> {
        &self.members
    }

    pub fn is_member(&self, member: &MemberId) -> bool {
        self.members.contains(member)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}
