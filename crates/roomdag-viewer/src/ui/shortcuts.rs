use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};
use std::sync::atomic::Ordering;

use crate::graph::{GraphState, InfoView, StateView};

pub fn handle_shortcuts(mut contexts: EguiContexts, mut st: ResMut<GraphState>) {
    let ctx = contexts.ctx_mut();
    let esc_pressed = ctx.input(|i| i.key_pressed(egui::Key::Escape));
    let wants_keyboard = ctx.wants_keyboard_input();

    if esc_pressed {
        if st.ui.search_open {
            st.ui.search_open = false;
        } else if st.ui.selected.is_some()
            || st.ui.hovered.is_some()
            || st.ui.info != InfoView::Empty
        {
            st.ui.hovered = None;
            st.ui.selected = None;
            st.ui.info = InfoView::Empty;
            st.ui.state = StateView::Empty;
            st.needs_redraw.store(true, Ordering::Relaxed);
        }
    }

    if wants_keyboard {
        return;
    }

    if ctx.input(|i| i.key_pressed(egui::Key::P) && i.modifiers.ctrl) {
        st.ui.search_open = true;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::F)) {
        st.ui.fit_to_view = true;
    }
}
