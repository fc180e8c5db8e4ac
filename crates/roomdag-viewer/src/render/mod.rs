pub mod camera;
pub mod graph;

pub use camera::{apply_jump_to, setup_scene};
pub use graph::{apply_picked, draw_graph, hover_detection, picking};
