//! Employee model
//!
//! Table: employees

use hr_core::traits::{Entity, Id, Identifiable};
use serde::{Deserialize, Serialize};

/// A person in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Id,
    /// Display name, stored trimmed
    pub name: String,
}

impl Employee {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Identifiable for Employee {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for Employee {
    const TYPE_NAME: &'static str = "Employee";
}
