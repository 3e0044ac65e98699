//! Sibling reordering without gratuitous version bumps
//!
//! Reordering is the one mutation where "nothing actually changed" is
//! common: clients resend the full order after a drag, and most rows end
//! up where they already were. The planner computes the minimal set of
//! sort-value assignments so that untouched rows keep their versions.

use pantry_core::{Error, Result};
use std::collections::HashSet;
use std::hash::Hash;

/// Plan new sort values for a desired sibling order
///
/// `current` is the sibling set with its stored sort values; `desired` is
/// the full new order by id. Returns `(id, new_sort_value)` for exactly the
/// rows whose sort value must change:
///
/// - If `desired` matches the current order, the plan is empty and no row
///   is touched.
/// - Otherwise rows are renumbered by position, and rows whose stored value
///   already equals their new position are skipped.
///
/// `desired` must be a permutation of the current ids; anything else
/// (missing ids, duplicates, strangers) is an InvalidRequest.
pub fn plan_reorder<K>(current: &[(K, i64)], desired: &[K]) -> Result<Vec<(K, i64)>>
where
    K: Copy + Eq + Hash,
{
    if desired.len() != current.len() {
        return Err(Error::invalid(format!(
            "reorder names {} of {} siblings",
            desired.len(),
            current.len()
        )));
    }

    let known: HashSet<K> = current.iter().map(|(id, _)| *id).collect();
    let mut seen: HashSet<K> = HashSet::with_capacity(desired.len());
    for id in desired {
        if !known.contains(id) {
            return Err(Error::invalid("reorder names an id outside the sibling set"));
        }
        if !seen.insert(*id) {
            return Err(Error::invalid("reorder names an id twice"));
        }
    }

    // Stable sort keeps insertion order for equal sort values, mirroring
    // how siblings are listed to clients.
    let mut ordered = current.to_vec();
    ordered.sort_by_key(|(_, sort)| *sort);

    let unchanged = ordered
        .iter()
        .zip(desired.iter())
        .all(|((id, _), want)| id == want);
    if unchanged {
        return Ok(Vec::new());
    }

    let sort_by_id: std::collections::HashMap<K, i64> = current.iter().copied().collect();
    let moves = desired
        .iter()
        .enumerate()
        .filter_map(|(position, id)| {
            let new_sort = position as i64;
            (sort_by_id[id] != new_sort).then_some((*id, new_sort))
        })
        .collect();
    Ok(moves)
}
