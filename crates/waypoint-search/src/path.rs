//! Path reconstruction from predecessor maps.

use std::collections::HashMap;

/// Walk the predecessor chain backward from target and return the path in
/// source-to-target order.
///
/// Returns the singleton `[source]` when source equals target, and an empty
/// vector when the chain does not terminate at the source (no path).
pub(crate) fn reconstruct(
    predecessors: &HashMap<String, Option<String>>,
    source: &str,
    target: &str,
) -> Vec<String> {
    if source == target {
        return vec![source.to_string()];
    }
    if predecessors.get(target).map_or(true, Option::is_none) {
        return Vec::new();
    }

    let mut path = vec![target.to_string()];
    let mut current = target;
    // A well-formed chain visits each node at most once
    for _ in 0..predecessors.len() {
        let Some(Some(prev)) = predecessors.get(current) else {
            break;
        };
        path.push(prev.clone());
        if prev == source {
            path.reverse();
            return path;
        }
        current = prev;
    }
    // Chain ended without reaching the source
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preds(pairs: &[(&str, Option<&str>)]) -> HashMap<String, Option<String>> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn source_equals_target() {
        let map = preds(&[("a", None)]);
        assert_eq!(reconstruct(&map, "a", "a"), vec!["a"]);
    }

    #[test]
    fn chain_to_source() {
        let map = preds(&[("a", None), ("b", Some("a")), ("c", Some("b"))]);
        assert_eq!(reconstruct(&map, "a", "c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_predecessor_means_no_path() {
        let map = preds(&[("a", None), ("c", None)]);
        assert!(reconstruct(&map, "a", "c").is_empty());
    }

    #[test]
    fn chain_not_reaching_source_means_no_path() {
        // c <- b, but b has no predecessor and is not the source
        let map = preds(&[("a", None), ("b", None), ("c", Some("b"))]);
        assert!(reconstruct(&map, "a", "c").is_empty());
    }
}
