//! `multipass list --format json` output.
//!
//! ```json
//! {"list": [{"name": "primary", "ipv4": ["192.168.64.2"], "state": "Running", "release": "22.04 LTS"}]}
//! ```

use multipass_hosts_core::Entity;
use serde::{Deserialize, Serialize};

use crate::Result;

/// One instance as Multipass reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    /// IPv4 addresses, first interface first. Empty while stopped.
    #[serde(default)]
    pub ipv4: Vec<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
}

impl Instance {
    pub fn into_entity(self) -> Entity {
        Entity::new(self.name, self.ipv4)
    }
}

/// Top-level object of the list output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOutput {
    #[serde(default)]
    pub list: Vec<Instance>,
}

/// Decode raw `multipass list --format json` stdout.
pub fn parse_list(stdout: &[u8]) -> Result<Vec<Instance>> {
    let output: ListOutput = serde_json::from_slice(stdout)?;
    Ok(output.list)
}

/// Convert instances to core entities, keeping their order.
pub fn to_entities(instances: Vec<Instance>) -> Vec<Entity> {
    instances.into_iter().map(Instance::into_entity).collect()
}
