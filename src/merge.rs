use std::mem::discriminant;

use crate::node::Node;

/// Merge `template` into `base` without clobbering values already in `base`.
///
/// If both sides have a map for the same key, recurse. Otherwise the template's
/// value is adopted only where `base` is missing (null) or holds a different
/// kind of value; anything else in `base` is left untouched.
pub fn merge_missing(base: &mut Node, template: &Node) {
    match (base, template) {
        (Node::Object(base_map), Node::Object(template_map)) => {
            for (key, template_val) in template_map {
                match base_map.get_mut(key) {
                    Some(base_val) => merge_missing(base_val, template_val),
                    None => {
                        base_map.insert(key.clone(), template_val.clone());
                    }
                }
            }
        }
        (_, Node::Null) => {}
        (base, template) => {
            if base.is_null() || discriminant(base) != discriminant(template) {
                *base = template.clone();
            }
        }
    }
}
