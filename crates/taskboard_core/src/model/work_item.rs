//! Work item domain model.
//!
//! # Responsibility
//! - Define the record owned by the work item store.
//! - Provide the identifier newtype used by drag payloads.
//!
//! # Invariants
//! - `id` is generated once at creation, never reused and never mutated.
//! - `status` is the only field that changes after creation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for one work item.
///
/// Backed by a random v4 UUID (122 bits of entropy), so identifiers are
/// pairwise distinct for any realistic number of creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkItemId(Uuid);

impl WorkItemId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Display for WorkItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for WorkItemId {
    type Err = WorkItemIdParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let uuid = Uuid::parse_str(trimmed)
            .map_err(|_| WorkItemIdParseError(trimmed.to_string()))?;
        if uuid.is_nil() {
            return Err(WorkItemIdParseError(trimmed.to_string()));
        }
        Ok(Self(uuid))
    }
}

/// Raised when text does not hold a work item identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItemIdParseError(pub String);

impl Display for WorkItemIdParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "not a work item id: `{}`", self.0)
    }
}

impl Error for WorkItemIdParseError {}

/// Board column a work item currently sits in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemStatus {
    /// Newly created or moved back for more work.
    #[default]
    Active,
    /// Work is done.
    Finished,
}

impl WorkItemStatus {
    /// Stable lowercase label used in logs and CLI input.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl FromStr for WorkItemStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            other => Err(format!(
                "unsupported status `{other}`; expected active|finished"
            )),
        }
    }
}

/// One unit of work tracked by the board.
///
/// Snapshots handed to views are plain clones of this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Generated at creation and never reassigned.
    pub id: WorkItemId,
    /// Short display name, non-empty after validation.
    pub title: String,
    /// Free text, 5 to 500 characters after validation.
    pub description: String,
    /// People assigned, 2 to 50 after validation.
    pub people_count: u32,
    /// Column the item renders in; only `transition` changes it.
    pub status: WorkItemStatus,
}

impl WorkItem {
    /// Creates an `Active` work item with a freshly generated id.
    ///
    /// Field values are expected to be pre-validated by the form layer.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        people_count: u32,
    ) -> Self {
        Self {
            id: WorkItemId::generate(),
            title: title.into(),
            description: description.into(),
            people_count,
            status: WorkItemStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == WorkItemStatus::Active
    }
}
