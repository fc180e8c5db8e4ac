use roomdag_core::{EventId, EventRow};

/// Requests the render loop hands to the fetch worker.
#[derive(Debug, Clone)]
pub enum Command {
    FetchRoom {
        room_id: String,
        max_stream: Option<u64>,
    },
    FetchState {
        event_id: EventId,
    },
}

/// Fetch results crossing back into the render loop.
#[derive(Debug, Clone)]
pub enum Incoming {
    Room {
        room_id: String,
        rows: Vec<EventRow>,
    },
    RoomError {
        room_id: String,
        error: String,
    },
    State {
        event_id: EventId,
        state: serde_json::Value,
    },
    StateError {
        event_id: EventId,
        error: String,
    },
}
