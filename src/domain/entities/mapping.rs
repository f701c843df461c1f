//! Mapping entity linking a short key / secret key pair to a target URL.

/// Lifecycle state of a mapping.
///
/// `Active -> Inactive` is the only transition; `Inactive` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingState {
    Active,
    Inactive,
}

impl MappingState {
    /// Returns the state for the persisted `is_active` column.
    pub fn from_active_flag(is_active: bool) -> Self {
        if is_active {
            MappingState::Active
        } else {
            MappingState::Inactive
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, MappingState::Active)
    }
}

/// A persisted URL mapping.
///
/// `key` and `secret_key` are unique across every row ever created, active or not.
/// Rows are never physically deleted; deactivation hides them from lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub id: i64,
    pub key: String,
    pub secret_key: String,
    pub target_url: String,
    pub state: MappingState,
    pub clicks: i64,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(
        id: i64,
        key: String,
        secret_key: String,
        target_url: String,
        state: MappingState,
        clicks: i64,
    ) -> Self {
        Self {
            id,
            key,
            secret_key,
            target_url,
            state,
            clicks,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

/// Input data for inserting a new mapping.
///
/// New rows always start active with zero clicks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub key: String,
    pub secret_key: String,
    pub target_url: String,
}
