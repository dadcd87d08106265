// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Copy-on-write publication for registry maps.
//!
//! Readers load an immutable `Arc` snapshot and never observe a partial
//! mutation. Writers derive a replacement from the snapshot they loaded and
//! publish it with compare-and-swap; losing the race means retrying against
//! the newer snapshot, so checks like "name already bound" stay linearizable.

use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};

/// What a writer wants to do with the snapshot it was shown.
pub(crate) enum Edit<M, R> {
    /// Leave the published map alone and return `R`.
    Keep(R),
    /// Publish the replacement map, then return `R` if the swap wins.
    Publish(M, R),
}

/// Apply `edit` to the current snapshot of `cell` until it wins or keeps.
///
/// `edit` may run more than once under contention and must not have side
/// effects beyond building its result.
pub(crate) fn publish<M, R>(cell: &ArcSwap<M>, mut edit: impl FnMut(&M) -> Edit<M, R>) -> R {
    let mut current = cell.load_full();
    loop {
        match edit(current.as_ref()) {
            Edit::Keep(result) => return result,
            Edit::Publish(next, result) => {
                let previous = cell.compare_and_swap(&current, Arc::new(next));
                if Arc::ptr_eq(&*previous, &current) {
                    return result;
                }
                current = Guard::into_inner(previous);
            }
        }
    }
}
