//! Core data types for the identity gateway

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile record stored in the document store's profile collection.
///
/// Created once at registration, keyed by the identity's unique id (1:1,
/// foreign-key-style), mutated only through explicit update calls, and never
/// deleted by this subsystem. Timestamps serialize camelCase to match the
/// stored document shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Identity id this profile belongs to (primary key in the collection)
    pub id: String,

    /// Display name captured at registration
    pub name: String,

    /// Contact email
    pub email: String,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp, refreshed on every profile update
    pub updated_at: DateTime<Utc>,
}

/// Partial field set merged into an existing profile record.
///
/// Absent fields are left untouched; every applied update refreshes the
/// record's `updatedAt` timestamp.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,

    /// New contact email
    pub email: Option<String>,
}

impl ProfileUpdate {
    /// True when the update carries no fields.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}
