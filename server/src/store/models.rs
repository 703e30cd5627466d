use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Column order shared by the CSV export and the admin table.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "id", "ts", "name", "email", "phone", "branch", "year", "college", "note",
];

/// Fields a visitor submits. Every field is optional on the wire; absent
/// values are stored as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistrationFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub branch: String,
    pub year: String,
    pub college: String,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    pub id: String,
    pub ts: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub note: String,
}

impl Registration {
    pub fn new(fields: RegistrationFields) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            branch: fields.branch,
            year: fields.year,
            college: fields.college,
            note: fields.note,
        }
    }

    /// Values in `EXPORT_COLUMNS` order.
    pub fn columns(&self) -> [&str; 9] {
        [
            &self.id,
            &self.ts,
            &self.name,
            &self.email,
            &self.phone,
            &self.branch,
            &self.year,
            &self.college,
            &self.note,
        ]
    }
}
