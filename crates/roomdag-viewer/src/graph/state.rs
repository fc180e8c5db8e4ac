use bevy::prelude::{Resource, Vec3};
use roomdag_core::EventId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc::UnboundedSender;

use crate::graph::layout;
use crate::graph::model::GraphModel;
use crate::net::{Command, Incoming};
use crate::util::config::{RequestConfig, ViewerConfig};
use crate::util::ids::short_event_id;

/// What the info panel is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InfoView {
    #[default]
    Empty,
    Event(EventId),
    NotFound(EventId),
}

/// What the state panel is showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StateView {
    #[default]
    Empty,
    Loading(EventId),
    Loaded(EventId, serde_json::Value),
    Failed(EventId, String),
}

#[derive(Default)]
pub struct UiState {
    pub room_input: String,
    pub max_stream_input: String,
    pub status: Option<String>,

    pub hovered: Option<EventId>,
    pub selected: Option<EventId>,
    pub info: InfoView,
    pub state: StateView,

    pub search_open: bool,
    pub search_query: String,
    pub search_hits: Vec<EventId>,
    pub jump_to: Option<EventId>,
    pub fit_to_view: bool,
}

pub struct CfgState {
    pub show_edges: bool,
    pub row_spacing: f32,
    pub col_spacing: f32,
}

impl Default for CfgState {
    fn default() -> Self {
        Self {
            show_edges: true,
            row_spacing: layout::ROW_SPACING,
            col_spacing: layout::COL_SPACING,
        }
    }
}

#[derive(Resource)]
pub struct GraphState {
    pub model: GraphModel,
    pub positions: HashMap<EventId, Vec3>,
    pub ui: UiState,
    pub cfg: CfgState,
    pub base_url: String,

    pub needs_redraw: AtomicBool,
}

impl Default for GraphState {
    fn default() -> Self {
        Self {
            model: GraphModel::default(),
            positions: HashMap::new(),
            ui: UiState::default(),
            cfg: CfgState::default(),
            base_url: String::new(),
            needs_redraw: AtomicBool::new(true),
        }
    }
}

impl GraphState {
    pub fn apply_viewer_config(&mut self, cfg: &ViewerConfig) {
        self.cfg.show_edges = cfg.show_edges;
        self.cfg.row_spacing = cfg.row_spacing;
        self.cfg.col_spacing = cfg.col_spacing;
    }

    /// Seed the form inputs from the immutable startup request, the way
    /// the original page pre-populated its form from the query string.
    pub fn apply_request(&mut self, request: &RequestConfig) {
        self.base_url = request.base_url.clone();
        self.ui.room_input = request.room_id.clone();
        self.ui.max_stream_input = request
            .max_stream
            .map(|n| n.to_string())
            .unwrap_or_default();
        self.ui.status = Some(format!("fetching {} …", request.room_id));
    }

    pub fn to_viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            base_url: self.base_url.clone(),
            default_room_id: self.ui.room_input.clone(),
            show_edges: self.cfg.show_edges,
            row_spacing: self.cfg.row_spacing,
            col_spacing: self.cfg.col_spacing,
        }
    }

    // ----- Apply fetch results -----
    pub fn apply(&mut self, inc: Incoming) {
        match inc {
            Incoming::Room { room_id, rows } => {
                self.model.load_rows(room_id, rows);
                self.clear_selection();
                self.ui.status = None;
                self.relayout();
                self.ui.fit_to_view = true;
            }
            Incoming::RoomError { room_id, error } => {
                self.ui.status = Some(format!("fetching {room_id} failed: {error}"));
            }
            Incoming::State { event_id, state } => {
                if self.state_pending_for(&event_id) {
                    self.ui.state = StateView::Loaded(event_id, state);
                }
            }
            Incoming::StateError { event_id, error } => {
                if self.state_pending_for(&event_id) {
                    self.ui.state = StateView::Failed(event_id, error);
                }
            }
        }
    }

    fn state_pending_for(&self, event_id: &EventId) -> bool {
        matches!(&self.ui.state, StateView::Loading(id) if id == event_id)
    }

    pub fn relayout(&mut self) {
        self.positions =
            layout::layout_levels(&self.model.graph, self.cfg.row_spacing, self.cfg.col_spacing);
        self.needs_redraw.store(true, Ordering::Relaxed);
    }

    // ----- Room form -----
    /// Validate the form inputs and issue a fresh room fetch.
    pub fn request_room(&mut self, tx: &UnboundedSender<Command>) {
        let room_id = self.ui.room_input.trim().to_string();
        if room_id.is_empty() {
            self.ui.status = Some("room id is empty".to_string());
            return;
        }

        let max_stream = match self.ui.max_stream_input.trim() {
            "" => None,
            raw => match raw.parse::<u64>() {
                Ok(n) => Some(n),
                Err(_) => {
                    self.ui.status = Some(format!("max_stream must be an integer, got {raw:?}"));
                    return;
                }
            },
        };

        self.ui.status = Some(format!("fetching {room_id} …"));
        let _ = tx.send(Command::FetchRoom {
            room_id,
            max_stream,
        });
    }

    // ----- Selection / inspection -----
    /// Inspect an event id: select it when it is in the batch, report
    /// "not found" when it is not, and in both cases ask the server for
    /// the resolved state at that event.
    pub fn select_event(&mut self, id: EventId, tx: &UnboundedSender<Command>) {
        if self.model.graph.contains(&id) {
            self.ui.selected = Some(id.clone());
            self.ui.info = InfoView::Event(id.clone());
        } else {
            self.ui.selected = None;
            self.ui.info = InfoView::NotFound(id.clone());
        }

        self.ui.state = StateView::Loading(id.clone());
        let _ = tx.send(Command::FetchState { event_id: id });
        self.needs_redraw.store(true, Ordering::Relaxed);
    }

    pub fn clear_selection(&mut self) {
        self.ui.hovered = None;
        self.ui.selected = None;
        self.ui.info = InfoView::Empty;
        self.ui.state = StateView::Empty;
        self.ui.search_open = false;
        self.ui.search_query.clear();
        self.ui.search_hits.clear();
        self.ui.jump_to = None;
        self.needs_redraw.store(true, Ordering::Relaxed);
    }

    // ----- Search helpers -----
    pub fn recompute_search_hits(&mut self, limit: usize) {
        self.ui.search_hits = self.model.search(&self.ui.search_query, limit);
    }

    pub fn request_jump(&mut self, id: EventId) {
        self.ui.jump_to = Some(id);
    }

    /// The original page labeled every node with id, type and
    /// state_key; here those lines back the hover tooltip.
    pub fn node_tooltip_lines(&self, id: &EventId) -> Vec<String> {
        let Some(event) = self.model.event(id) else {
            return vec![id.0.clone()];
        };
        vec![
            id.0.clone(),
            format!("type: {}", event.etype),
            format!("state_key: {}", event.state_key.as_deref().unwrap_or("")),
            format!("state_group: {}", event.state_group),
            format!("level: {}", event.level.map_or("?".to_string(), |l| l.to_string())),
        ]
    }

    pub fn node_label(&self, id: &EventId) -> String {
        match self.model.event(id) {
            Some(event) => format!("{} ({})", short_event_id(&id.0), event.etype),
            None => short_event_id(&id.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomdag_core::EventRow;
    use serde_json::json;
    use tokio::sync::mpsc;

    fn row(event_id: &str, edges: &[&str]) -> EventRow {
        EventRow {
            event_id: event_id.to_string(),
            etype: "m.room.message".to_string(),
            state_key: None,
            depth: 1,
            sender: "@alice:example.org".to_string(),
            state_group: 1,
            content: json!({}),
            edges: edges.iter().map(|e| e.to_string()).collect(),
            ts: 0,
        }
    }

    fn loaded_state() -> GraphState {
        let mut st = GraphState::default();
        st.apply(Incoming::Room {
            room_id: "!r:example.org".to_string(),
            rows: vec![row("$a", &[]), row("$b", &["$a"])],
        });
        st
    }

    #[test]
    fn room_arrival_levels_and_positions_everything() {
        let st = loaded_state();

        assert_eq!(st.model.graph.len(), 2);
        assert!(st.ui.status.is_none());
        assert!(st.ui.fit_to_view);
        assert!(st.positions.contains_key(&EventId::new("$a")));
        assert!(st.positions.contains_key(&EventId::new("$b")));
    }

    #[test]
    fn selecting_known_event_requests_its_state() {
        let mut st = loaded_state();
        let (tx, mut rx) = mpsc::unbounded_channel();

        st.select_event(EventId::new("$a"), &tx);

        assert_eq!(st.ui.selected, Some(EventId::new("$a")));
        assert_eq!(st.ui.info, InfoView::Event(EventId::new("$a")));
        assert!(matches!(st.ui.state, StateView::Loading(_)));
        assert!(matches!(
            rx.try_recv(),
            Ok(Command::FetchState { event_id }) if event_id == EventId::new("$a")
        ));
    }

    #[test]
    fn selecting_unknown_event_reports_not_found_but_still_fetches_state() {
        let mut st = loaded_state();
        let (tx, mut rx) = mpsc::unbounded_channel();

        st.select_event(EventId::new("$nope"), &tx);

        assert_eq!(st.ui.selected, None);
        assert_eq!(st.ui.info, InfoView::NotFound(EventId::new("$nope")));
        assert!(matches!(rx.try_recv(), Ok(Command::FetchState { .. })));
    }

    #[test]
    fn state_result_only_lands_on_matching_request() {
        let mut st = loaded_state();
        let (tx, _rx) = mpsc::unbounded_channel();
        st.select_event(EventId::new("$a"), &tx);

        st.apply(Incoming::State {
            event_id: EventId::new("$stale"),
            state: json!([]),
        });
        assert!(matches!(st.ui.state, StateView::Loading(_)));

        st.apply(Incoming::State {
            event_id: EventId::new("$a"),
            state: json!([{"type": "m.room.create"}]),
        });
        assert!(matches!(st.ui.state, StateView::Loaded(_, _)));
    }

    #[test]
    fn invalid_max_stream_is_rejected_before_fetching() {
        let mut st = GraphState::default();
        st.ui.room_input = "!r:example.org".to_string();
        st.ui.max_stream_input = "soon".to_string();
        let (tx, mut rx) = mpsc::unbounded_channel();

        st.request_room(&tx);

        assert!(st.ui.status.as_deref().unwrap().contains("max_stream"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn fetch_failure_keeps_previous_graph() {
        let mut st = loaded_state();
        st.apply(Incoming::RoomError {
            room_id: "!r:example.org".to_string(),
            error: "connection refused".to_string(),
        });

        assert_eq!(st.model.graph.len(), 2);
        assert!(st.ui.status.as_deref().unwrap().contains("connection refused"));
    }
}
