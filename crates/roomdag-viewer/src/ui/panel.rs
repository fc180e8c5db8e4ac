use bevy::prelude::{Res, ResMut};
use bevy_egui::{egui, EguiContexts};

use crate::app::resources::NetTx;
use crate::graph::{GraphState, InfoView, StateView};
use crate::util::config;
use crate::util::ids::short_event_id;

pub fn ui_panel(mut contexts: EguiContexts, mut st: ResMut<GraphState>, tx: Res<NetTx>) {
    egui::SidePanel::left("left")
        .min_width(360.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("RoomDAG");
            match st.model.room_id.clone() {
                Some(room_id) => ui.label(format!("room: {room_id}")),
                None => ui.label("no room loaded"),
            };
            ui.label(format!("events: {}", st.model.graph.len()));
            ui.label(format!("edges: {}", st.model.graph.edge_count()));
            if let Some(max) = st.model.max_level() {
                ui.label(format!("levels: {}", max + 1));
            }

            ui.add_space(8.0);
            ui.separator();
            ui.label("Room id:");
            ui.text_edit_singleline(&mut st.ui.room_input);
            ui.label("Max stream:");
            ui.text_edit_singleline(&mut st.ui.max_stream_input);
            if ui.button("Load").clicked() {
                st.request_room(&tx.0);
            }
            if let Some(status) = st.ui.status.clone() {
                ui.label(status);
            }
            if let Some(err) = &st.model.level_error {
                ui.colored_label(egui::Color32::LIGHT_RED, err.to_string());
            }

            ui.add_space(8.0);
            ui.separator();
            ui.checkbox(&mut st.cfg.show_edges, "Edges");
            let row = ui.add(egui::Slider::new(&mut st.cfg.row_spacing, 1.0..=6.0).text("row spacing"));
            let col = ui.add(egui::Slider::new(&mut st.cfg.col_spacing, 1.0..=6.0).text("col spacing"));
            if row.changed() || col.changed() {
                st.relayout();
            }

            ui.add_space(8.0);
            if ui.button("Find event (Ctrl+P)").clicked() {
                st.ui.search_open = true;
            }
            if ui.button("Save view settings").clicked() {
                if let Err(e) = config::save(&st.to_viewer_config()) {
                    st.ui.status = Some(format!("save failed: {e:#}"));
                }
            }

            ui.add_space(8.0);
            ui.separator();
            ui.heading("Event");
            match st.ui.info.clone() {
                InfoView::Empty => {
                    ui.label("click a node, or press Ctrl+P");
                }
                InfoView::NotFound(id) => {
                    ui.label(format!("{} — not found in this batch", id.0));
                }
                InfoView::Event(id) => {
                    if let Some(event) = st.model.event(&id) {
                        let pretty = serde_json::to_string_pretty(event)
                            .unwrap_or_else(|_| id.0.clone());
                        let ts = event.ts;
                        egui::ScrollArea::vertical()
                            .id_source("event_info")
                            .max_height(220.0)
                            .show(ui, |ui| {
                                ui.monospace(pretty);
                            });
                        if ts != 0 {
                            ui.label(format_timestamp(ts));
                        }
                    }
                }
            }

            ui.add_space(8.0);
            ui.separator();
            ui.heading("State");
            match &st.ui.state {
                StateView::Empty => {
                    ui.label("—");
                }
                StateView::Loading(id) => {
                    ui.label(format!("loading state at {} …", short_event_id(&id.0)));
                }
                StateView::Loaded(_, state) => {
                    let pretty = serde_json::to_string_pretty(state)
                        .unwrap_or_else(|_| state.to_string());
                    egui::ScrollArea::vertical()
                        .id_source("event_state")
                        .max_height(220.0)
                        .show(ui, |ui| {
                            ui.monospace(pretty);
                        });
                }
                StateView::Failed(id, error) => {
                    ui.colored_label(
                        egui::Color32::LIGHT_RED,
                        format!("state at {} failed: {error}", short_event_id(&id.0)),
                    );
                }
            }
        });

    super::search::search_overlay(contexts, st, tx);
}

fn format_timestamp(ts_ms: i64) -> String {
    match chrono::DateTime::from_timestamp_millis(ts_ms) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("ts: {ts_ms}"),
    }
}
