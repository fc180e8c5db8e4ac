pub mod layout;
pub mod model;
pub mod state;

pub use state::{GraphState, InfoView, StateView};
