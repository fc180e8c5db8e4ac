use roomdag_core::{assign_levels, Event, EventGraph, EventId, EventRow, LevelError};

/// The currently loaded batch: one room's events, leveled on arrival.
#[derive(Default)]
pub struct GraphModel {
    pub graph: EventGraph,
    pub room_id: Option<String>,
    pub level_error: Option<LevelError>,
}

impl GraphModel {
    /// Replace the graph with a freshly fetched batch and re-run level
    /// assignment. A detected cycle is recorded, not fatal; whatever
    /// levels were assigned before detection stay in place.
    pub fn load_rows(&mut self, room_id: String, rows: Vec<EventRow>) {
        let mut graph = EventGraph::from_rows(rows);
        self.level_error = assign_levels(&mut graph).err();
        self.graph = graph;
        self.room_id = Some(room_id);
    }

    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.graph.get(id)
    }

    pub fn max_level(&self) -> Option<u32> {
        self.graph.events().filter_map(|e| e.level).max()
    }

    /// Substring search over id, type, state_key and sender; hits come
    /// back sorted and capped.
    pub fn search(&self, query: &str, limit: usize) -> Vec<EventId> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<EventId> = self
            .graph
            .events()
            .filter(|event| {
                event.id.0.to_lowercase().contains(&q)
                    || event.etype.to_lowercase().contains(&q)
                    || event
                        .state_key
                        .as_deref()
                        .is_some_and(|k| k.to_lowercase().contains(&q))
                    || event.sender.to_lowercase().contains(&q)
            })
            .map(|event| event.id.clone())
            .collect();

        hits.sort();
        hits.truncate(limit.max(1));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(event_id: &str, etype: &str, edges: &[&str]) -> EventRow {
        EventRow {
            event_id: event_id.to_string(),
            etype: etype.to_string(),
            state_key: None,
            depth: 1,
            sender: "@alice:example.org".to_string(),
            state_group: 3,
            content: json!({}),
            edges: edges.iter().map(|e| e.to_string()).collect(),
            ts: 0,
        }
    }

    #[test]
    fn load_rows_levels_the_batch() {
        let mut model = GraphModel::default();
        model.load_rows(
            "!r:example.org".to_string(),
            vec![row("$a", "m.room.create", &[]), row("$b", "m.room.message", &["$a"])],
        );

        assert!(model.level_error.is_none());
        assert_eq!(model.graph.level(&EventId::new("$a")), Some(1));
        assert_eq!(model.graph.level(&EventId::new("$b")), Some(0));
        assert_eq!(model.max_level(), Some(1));
    }

    #[test]
    fn load_rows_records_cycle_but_keeps_graph() {
        let mut model = GraphModel::default();
        model.load_rows(
            "!r:example.org".to_string(),
            vec![row("$a", "m.room.message", &["$b"]), row("$b", "m.room.message", &["$a"])],
        );

        assert!(model.level_error.is_some());
        assert_eq!(model.graph.len(), 2);
    }

    #[test]
    fn search_matches_type_and_sorts_hits() {
        let mut model = GraphModel::default();
        model.load_rows(
            "!r:example.org".to_string(),
            vec![
                row("$b", "m.room.member", &[]),
                row("$a", "m.room.member", &[]),
                row("$c", "m.room.message", &[]),
            ],
        );

        let hits = model.search("member", 10);
        assert_eq!(hits, vec![EventId::new("$a"), EventId::new("$b")]);
        assert!(model.search("   ", 10).is_empty());
    }
}
