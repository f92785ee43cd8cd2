//! Manual ordering for drag-and-drop lists
//!
//! Sections, links, social links and testimonials carry a zero-based `index`
//! that stays contiguous per parent. Repositories compute appends and apply
//! the plans built here inside a single transaction, with the parent locked.

use std::collections::HashSet;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Index for a newly created item appended to a list of `count` siblings
pub fn next_index(count: i64) -> Result<i32, DomainError> {
    i32::try_from(count)
        .map_err(|_| DomainError::ValidationError(format!("list is full at {count} items")))
}

/// Build the `(id, index)` assignments for a reorder request
///
/// `requested` must be a permutation of `current`: same length, no duplicate
/// ids and no ids that are not currently in the list.
pub fn plan_reorder(
    current: &[Snowflake],
    requested: &[Snowflake],
) -> Result<Vec<(Snowflake, i32)>, DomainError> {
    if current.len() != requested.len() {
        return Err(DomainError::ReorderMismatch(format!(
            "expected {} ids, got {}",
            current.len(),
            requested.len()
        )));
    }

    let known: HashSet<Snowflake> = current.iter().copied().collect();
    let mut seen = HashSet::with_capacity(requested.len());

    for id in requested {
        if !known.contains(id) {
            return Err(DomainError::ReorderMismatch(format!("unknown id {id}")));
        }
        if !seen.insert(*id) {
            return Err(DomainError::ReorderMismatch(format!("duplicate id {id}")));
        }
    }

    requested
        .iter()
        .enumerate()
        .map(|(position, id)| Ok((*id, next_index(position as i64)?)))
        .collect()
}
