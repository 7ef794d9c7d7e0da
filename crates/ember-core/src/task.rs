use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::datetime::iso_date_serde;

/// A single list entry. `text` and `due` never change after creation;
/// `completed` flips only through [`crate::store::TaskStore`] operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    pub text: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default, rename = "dueDate", with = "iso_date_serde::option")]
    pub due: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
            due: None,
        }
    }
}
