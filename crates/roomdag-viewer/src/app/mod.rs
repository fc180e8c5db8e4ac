use bevy::prelude::*;

use crate::app::events::Picked;
use crate::app::resources::NetRx;
use crate::graph::GraphState;
use crate::util::config::{RequestConfig, ViewerConfig};

pub mod events;
pub mod resources;

pub struct RoomDagViewerPlugin {
    pub cfg: ViewerConfig,
    pub request: RequestConfig,
}

impl Plugin for RoomDagViewerPlugin {
    fn build(&self, app: &mut App) {
        let mut st = GraphState::default();
        st.apply_viewer_config(&self.cfg);
        st.apply_request(&self.request);
        app.add_event::<Picked>()
            .insert_resource(st)
            .add_systems(Startup, crate::render::setup_scene)
            .add_systems(
                Update,
                (
                    pump_network,
                    crate::ui::handle_shortcuts,
                    crate::ui::ui_panel,
                    crate::render::hover_detection,
                    crate::render::picking,
                    crate::render::apply_picked,
                    crate::render::draw_graph,
                    crate::render::apply_jump_to,
                ),
            );
    }
}

fn pump_network(mut st: ResMut<GraphState>, rx: Res<NetRx>) {
    for msg in rx.0.try_iter().take(64) {
        st.apply(msg);
    }
}
