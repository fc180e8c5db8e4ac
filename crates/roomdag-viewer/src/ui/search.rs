use bevy::prelude::{Res, ResMut};
use bevy_egui::{egui, EguiContexts};
use roomdag_core::EventId;

use crate::app::resources::NetTx;
use crate::graph::GraphState;

// Ctrl+P find/jump overlay. Enter inspects the exact id if it is in
// the batch, else the first hit, else the raw query — so asking for an
// unknown id still shows "not found" plus the state at that event.
pub fn search_overlay(mut contexts: EguiContexts, mut st: ResMut<GraphState>, tx: Res<NetTx>) {
    let ctx = contexts.ctx_mut();

    if !st.ui.search_open {
        return;
    }

    egui::Window::new("Find event (Ctrl+P)")
        .collapsible(false)
        .resizable(true)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Event id:");
                let resp = ui.text_edit_singleline(&mut st.ui.search_query);
                if resp.changed() {
                    st.recompute_search_hits(30);
                }
                if ui.button("Close (Esc)").clicked() {
                    st.ui.search_open = false;
                }
            });

            ui.separator();
            ui.label("Hits:");
            ui.add_space(4.0);

            let mut picked: Option<EventId> = None;
            egui::ScrollArea::vertical()
                .max_height(260.0)
                .show(ui, |ui| {
                    for id in st.ui.search_hits.iter() {
                        if ui.selectable_label(false, st.node_label(id)).clicked() {
                            picked = Some(id.clone());
                        }
                    }
                });

            if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
                let query = st.ui.search_query.trim().to_string();
                picked = if query.is_empty() {
                    None
                } else if st.model.graph.contains(&EventId::new(query.clone())) {
                    Some(EventId::new(query))
                } else if let Some(first) = st.ui.search_hits.first() {
                    Some(first.clone())
                } else {
                    Some(EventId::new(query))
                };
            }

            if let Some(id) = picked {
                let found = st.model.graph.contains(&id);
                st.select_event(id.clone(), &tx.0);
                if found {
                    st.request_jump(id);
                }
                st.ui.search_open = false;
            }
        });
}
