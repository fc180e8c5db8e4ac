use bevy::prelude::Vec3;
use roomdag_core::{EventGraph, EventId};
use std::collections::HashMap;

pub const ROW_SPACING: f32 = 2.0;
pub const COL_SPACING: f32 = 2.4;

/// Deterministic hierarchical placement of a leveled graph: level 0 on
/// the bottom row, ancestors above it. Within a row events are ordered
/// by (state_group, event_id) so state groups cluster side by side, and
/// the row is centered around x = 0.
pub fn layout_levels(
    graph: &EventGraph,
    row_spacing: f32,
    col_spacing: f32,
) -> HashMap<EventId, Vec3> {
    let mut rows: HashMap<u32, Vec<(i64, EventId)>> = HashMap::new();
    for event in graph.events() {
        // an unleveled event only exists after a reported cycle
        let level = event.level.unwrap_or(0);
        rows.entry(level)
            .or_default()
            .push((event.state_group, event.id.clone()));
    }

    let mut positions = HashMap::new();
    for (level, mut row) in rows {
        row.sort();
        let mid = (row.len() as f32 - 1.0) / 2.0;
        for (i, (_, id)) in row.into_iter().enumerate() {
            let x = (i as f32 - mid) * col_spacing;
            let y = level as f32 * row_spacing;
            positions.insert(id, Vec3::new(x, y, 0.0));
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomdag_core::{assign_levels, EventRow};
    use serde_json::json;

    fn graph(rows: &[(&str, i64, &[&str])]) -> EventGraph {
        let mut g = EventGraph::from_rows(
            rows.iter()
                .map(|(event_id, state_group, edges)| EventRow {
                    event_id: event_id.to_string(),
                    etype: "m.room.message".to_string(),
                    state_key: None,
                    depth: 1,
                    sender: "@alice:example.org".to_string(),
                    state_group: *state_group,
                    content: json!({}),
                    edges: edges.iter().map(|e| e.to_string()).collect(),
                    ts: 0,
                })
                .collect(),
        );
        assign_levels(&mut g).expect("acyclic");
        g
    }

    #[test]
    fn parents_sit_above_children() {
        let g = graph(&[("$child", 1, &["$parent"]), ("$parent", 1, &[])]);
        let pos = layout_levels(&g, ROW_SPACING, COL_SPACING);

        let child = pos[&EventId::new("$child")];
        let parent = pos[&EventId::new("$parent")];
        assert!(parent.y > child.y);
        assert_eq!(child.y, 0.0);
    }

    #[test]
    fn rows_are_centered_and_group_ordered() {
        let g = graph(&[("$b", 2, &[]), ("$a", 1, &[]), ("$c", 1, &[])]);
        let pos = layout_levels(&g, ROW_SPACING, COL_SPACING);

        // row order: ($a group 1, $c group 1, $b group 2)
        let a = pos[&EventId::new("$a")];
        let b = pos[&EventId::new("$b")];
        let c = pos[&EventId::new("$c")];
        assert!(a.x < c.x && c.x < b.x);
        assert_eq!(a.x + b.x, 0.0);
        assert_eq!(c.x, 0.0);
    }

    #[test]
    fn lone_event_lands_at_origin() {
        let g = graph(&[("$only", 1, &[])]);
        let pos = layout_levels(&g, ROW_SPACING, COL_SPACING);
        assert_eq!(pos[&EventId::new("$only")], Vec3::ZERO);
    }
}
