use serde::{Deserialize, Serialize};
use std::collections::HashMap;

mod levels;

pub use levels::{assign_levels, LevelError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// One row of the debug endpoint's `/room/{room_id}` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRow {
    pub event_id: String,
    pub etype: String,
    pub state_key: Option<String>,
    pub depth: i64,
    pub sender: String,
    pub state_group: i64,
    pub content: serde_json::Value,
    pub edges: Vec<String>,
    #[serde(default)]
    pub ts: i64,
}

/// A node of the in-memory event graph. `edges` point at the event's
/// parents (the ids it descends from); `level` is filled in by
/// [`assign_levels`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub etype: String,
    pub state_key: Option<String>,
    pub depth: i64,
    pub sender: String,
    pub state_group: i64,
    pub content: serde_json::Value,
    pub edges: Vec<EventId>,
    pub ts: i64,
    pub level: Option<u32>,
}

impl Event {
    pub fn from_row(row: EventRow) -> Self {
        Self {
            id: EventId(row.event_id),
            etype: row.etype,
            state_key: row.state_key,
            depth: row.depth,
            sender: row.sender,
            state_group: row.state_group,
            content: row.content,
            edges: row.edges.into_iter().map(EventId).collect(),
            ts: row.ts,
            level: None,
        }
    }
}

/// Insertion-ordered event map for a single fetched batch. Built fresh
/// per room query and discarded on the next one.
#[derive(Debug, Clone, Default)]
pub struct EventGraph {
    events: HashMap<EventId, Event>,
    order: Vec<EventId>,
}

impl EventGraph {
    pub fn from_rows(rows: Vec<EventRow>) -> Self {
        let mut graph = Self::default();
        for row in rows {
            let event = Event::from_row(row);
            let id = event.id.clone();
            if graph.events.insert(id.clone(), event).is_none() {
                graph.order.push(id);
            }
        }
        graph
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.events.contains_key(id)
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.get(id)
    }

    pub fn level(&self, id: &EventId) -> Option<u32> {
        self.events.get(id).and_then(|e| e.level)
    }

    /// Ids in the order the rows arrived.
    pub fn ids(&self) -> impl Iterator<Item = &EventId> {
        self.order.iter()
    }

    /// Events in the order the rows arrived.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.order.iter().filter_map(|id| self.events.get(id))
    }

    /// Total parent edges, including ones pointing outside the batch.
    pub fn edge_count(&self) -> usize {
        self.events.values().map(|e| e.edges.len()).sum()
    }

    pub(crate) fn get_mut(&mut self, id: &EventId) -> Option<&mut Event> {
        self.events.get_mut(id)
    }
}
