use std::fmt::Write;

use super::{END_MARKER, LINE_BREAK, START_MARKER};
use crate::domain::Entity;

/// Render the hosts block for `entities`.
///
/// One `"<first address> <name>"` line per entity, in list order. Entities
/// without an address are skipped.
pub fn render(entities: &[Entity]) -> String {
    let mut block = String::from(START_MARKER);

    for entity in entities {
        if let Some(ip) = entity.primary_address() {
            // Writing into a String cannot fail.
            let _ = write!(block, "{ip} {}{LINE_BREAK}", entity.name);
        }
    }

    block.push_str(END_MARKER);
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm(name: &str, ips: &[&str]) -> Entity {
        Entity::new(name, ips.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_render_empty_list_is_bare_markers() {
        assert_eq!(render(&[]), "#multipass-hosts\n#/multipass-hosts\n");
    }

    #[test]
    fn test_render_first_address_only() {
        let block = render(&[vm("vm1", &["10.0.0.2", "10.0.0.3"])]);
        assert_eq!(block, "#multipass-hosts\n10.0.0.2 vm1\n#/multipass-hosts\n");
        assert!(!block.contains("10.0.0.3"));
    }

    #[test]
    fn test_render_skips_entities_without_address() {
        let block = render(&[vm("vm1", &["10.0.0.2"]), vm("vm2", &[])]);
        assert_eq!(block, "#multipass-hosts\n10.0.0.2 vm1\n#/multipass-hosts\n");
    }

    #[test]
    fn test_render_preserves_list_order() {
        let block = render(&[
            vm("zeta", &["10.0.0.9"]),
            vm("alpha", &["10.0.0.1"]),
            vm("mid", &["10.0.0.5"]),
        ]);
        assert_eq!(
            block,
            "#multipass-hosts\n10.0.0.9 zeta\n10.0.0.1 alpha\n10.0.0.5 mid\n#/multipass-hosts\n"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let entities = vec![vm("vm1", &["10.0.0.2"]), vm("vm2", &["10.0.0.3"])];
        assert_eq!(render(&entities), render(&entities));
    }
}
