//! Named instances and the alias map that extends them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One VM instance as reported by the instance lister.
///
/// `addresses` may be empty (no usable IP yet) or hold several values when
/// the instance has more than one interface. Only the first is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub addresses: Vec<String>,
}

impl Entity {
    pub fn new(name: impl Into<String>, addresses: Vec<String>) -> Self {
        Self {
            name: name.into(),
            addresses,
        }
    }

    /// The address written to the hosts block, if any.
    pub fn primary_address(&self) -> Option<&str> {
        self.addresses.first().map(String::as_str)
    }
}

/// Target entity name → alias names.
///
/// Ordered by target name so that expansion, and therefore the rendered
/// block, is identical from run to run.
pub type AliasMap = BTreeMap<String, Vec<String>>;

/// Find an entity by exact name. Names are not unique; the first one wins.
pub fn find_entity<'a>(entities: &'a [Entity], name: &str) -> Option<&'a Entity> {
    entities.iter().find(|e| e.name == name)
}
