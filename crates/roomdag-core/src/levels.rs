//! Hierarchical level assignment over the event graph.
//!
//! Walks child→parent edges so that every parent ends up strictly
//! deeper than each of its children. When several paths reach the same
//! event with different depths, the deepest proposal wins.

use thiserror::Error;

use crate::{EventGraph, EventId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("cycle detected while assigning levels (at {0})")]
    CycleDetected(String),
}

/// Assign a rendering level to every event in the graph, in place.
///
/// Each event still without a level seeds a walk at level 0, in row
/// arrival order; parents are then pushed to `proposed + 1` until no
/// proposal beats an existing assignment. Edges pointing outside the
/// batch are skipped. An acyclic graph can never propose a level as
/// large as the node count, so reaching it reports a cycle instead of
/// looping; levels assigned up to that point are left in place.
pub fn assign_levels(graph: &mut EventGraph) -> Result<(), LevelError> {
    let bound = graph.len() as u32;
    let seeds: Vec<EventId> = graph.ids().cloned().collect();

    for seed in seeds {
        if graph.level(&seed).is_some() {
            // already placed as somebody's parent
            continue;
        }

        let mut work: Vec<(EventId, u32)> = vec![(seed, 0)];
        while let Some((id, proposed)) = work.pop() {
            let Some(event) = graph.get_mut(&id) else {
                continue;
            };
            if event.level.is_some_and(|level| level >= proposed) {
                // already deep enough
                continue;
            }
            if proposed >= bound {
                return Err(LevelError::CycleDetected(id.0));
            }
            event.level = Some(proposed);
            for parent in event.edges.clone() {
                work.push((parent, proposed + 1));
            }
        }
    }

    Ok(())
}
