//! Domain types: entities, alias maps and the error taxonomy.

pub mod entity;
pub mod error;

pub use entity::{find_entity, AliasMap, Entity};
pub use error::{HostsError, Result};
