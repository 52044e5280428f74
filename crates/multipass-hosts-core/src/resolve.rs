//! Alias expansion.
//!
//! Every alias whose target exists in the entity list becomes a synthetic
//! entity carrying a copy of the target's addresses. Aliases pointing at
//! names that are not present are dropped without error.

use crate::domain::{find_entity, AliasMap, Entity};

/// Expand `aliases` against `entities`.
///
/// The result is `entities` followed by one synthetic entity per resolvable
/// alias, grouped by target in map order and by listing order within a
/// target. The input slice is left untouched.
pub fn resolve(entities: &[Entity], aliases: &AliasMap) -> Vec<Entity> {
    let mut expanded = entities.to_vec();

    for (target, names) in aliases {
        let Some(found) = find_entity(entities, target) else {
            continue;
        };
        expanded.extend(
            names
                .iter()
                .map(|alias| Entity::new(alias.clone(), found.addresses.clone())),
        );
    }

    expanded
}

/// Alias targets that have no matching entity. Useful for reporting.
pub fn dangling_targets<'a>(entities: &[Entity], aliases: &'a AliasMap) -> Vec<&'a str> {
    aliases
        .keys()
        .filter(|target| find_entity(entities, target).is_none())
        .map(String::as_str)
        .collect()
}
