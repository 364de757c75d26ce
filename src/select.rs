use crate::Rule;

/// Narrow `rules` to the enabled rules scoped to `block_id`, in evaluation
/// order: ascending priority, ties kept in insertion order.
pub fn select_applicable<'a>(rules: &'a [Rule], block_id: &str) -> Vec<&'a Rule> {
    let mut selected: Vec<(usize, &Rule)> = rules
        .iter()
        .enumerate()
        .filter(|(_, r)| r.enabled && r.block_id == block_id)
        .collect();
    selected.sort_by_key(|&(index, rule)| (rule.priority, index));
    selected.into_iter().map(|(_, rule)| rule).collect()
}
