use std::collections::BTreeSet;

use crate::model::{Layout, Tier};

/// Next free id for `tier`: one past the largest `<tier><digits>` suffix found
/// anywhere in `layout`, or `<tier>0` when the tier is empty.
///
/// There is no counter between calls, so deleting the highest-numbered entity
/// of a tier frees its number for the next creation. When the largest suffix
/// is `u64::MAX`, the lowest unused suffix is taken instead.
pub fn next_id(tier: Tier, layout: &Layout) -> String {
    let taken: BTreeSet<u64> = layout
        .ids(tier)
        .into_iter()
        .filter_map(|id| id_suffix(tier, id))
        .collect();
    let next = match taken.last() {
        None => 0,
        Some(&max) => match max.checked_add(1) {
            Some(next) => next,
            None => lowest_free(&taken),
        },
    };
    format!("{}{next}", tier.prefix())
}

/// Smallest suffix not in `taken`. `taken` holds fewer ids than a tree can
/// address, so a gap always exists below `u64::MAX`.
fn lowest_free(taken: &BTreeSet<u64>) -> u64 {
    let mut candidate = 0;
    for &n in taken {
        if n != candidate {
            break;
        }
        candidate += 1;
    }
    candidate
}

/// Numeric suffix of `id` if it has exactly the `<tier><digits>` shape.
pub fn id_suffix(tier: Tier, id: &str) -> Option<u64> {
    let digits = id.strip_prefix(tier.prefix())?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, Component, Row};

    #[test]
    fn empty_tier_starts_at_zero() {
        let layout = Layout::default();
        assert_eq!(next_id(Tier::Row, &layout), "row0");
        assert_eq!(next_id(Tier::Column, &layout), "column0");
        assert_eq!(next_id(Tier::Component, &layout), "component0");
    }

    #[test]
    fn seed_ids_continue_after_max() {
        let layout = Layout::seed();
        assert_eq!(next_id(Tier::Row, &layout), "row2");
        assert_eq!(next_id(Tier::Column, &layout), "column3");
        assert_eq!(next_id(Tier::Component, &layout), "component3");
    }

    #[test]
    fn foreign_ids_are_ignored() {
        let layout = Layout::new(vec![
            Row::new("hero").column(
                Column::new("column7")
                    .component(Component::new("component", "x", "x"))
                    .component(Component::new("component4b", "x", "x"))
                    .component(Component::new("columnX", "x", "x")),
            ),
        ]);
        assert_eq!(next_id(Tier::Row, &layout), "row0");
        assert_eq!(next_id(Tier::Column, &layout), "column8");
        assert_eq!(next_id(Tier::Component, &layout), "component0");
    }

    #[test]
    fn suffix_requires_exact_prefix() {
        assert_eq!(id_suffix(Tier::Row, "row12"), Some(12));
        assert_eq!(id_suffix(Tier::Row, "row-drop-1"), None);
        assert_eq!(id_suffix(Tier::Column, "component3"), None);
        assert_eq!(id_suffix(Tier::Component, "component"), None);
    }

    #[test]
    fn overflowing_suffix_falls_back_to_lowest_free_number() {
        let layout = Layout::new(vec![Row::new("row0").column(
            Column::new("column0")
                .component(Component::new("component18446744073709551615", "x", "x"))
                .component(Component::new("component0", "x", "x")),
        )]);
        let next = next_id(Tier::Component, &layout);
        assert_eq!(next, "component1");
        assert!(!layout.ids(Tier::Component).contains(&next.as_str()));
    }

    #[test]
    fn lone_max_suffix_yields_zero() {
        let layout = Layout::new(vec![Row::new("row18446744073709551615")]);
        assert_eq!(next_id(Tier::Row, &layout), "row0");
    }
}
