use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use roomdag_core::EventId;
use std::collections::HashMap;
use std::sync::atomic::Ordering;

use crate::app::events::Picked;
use crate::app::resources::NetTx;
use crate::graph::GraphState;
use crate::ui::tooltips::render_tooltip;
use crate::util::ids::stable_u32;

#[derive(Component)]
pub struct NodeMarker;

const SPHERE_RADIUS: f32 = 0.28;
const EDGE_COLOR: Color = Color::srgb(0.55, 0.55, 0.65);

pub fn hover_detection(
    windows: Query<&Window>,
    cam_q: Query<(&Camera, &GlobalTransform)>,
    mut contexts: EguiContexts,
    mut st: ResMut<GraphState>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        st.ui.hovered = None;
        return;
    };
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };
    if contexts.ctx_mut().wants_pointer_input() {
        return;
    }

    let mut best: Option<(f32, EventId)> = None;
    for (id, pos) in st.positions.iter() {
        let Some(screen) = camera.world_to_viewport(cam_tf, *pos) else {
            continue;
        };
        let d = screen.distance(cursor);
        if d < 18.0 && best.as_ref().map(|(bd, _)| d < *bd).unwrap_or(true) {
            best = Some((d, id.clone()));
        }
    }
    st.ui.hovered = best.map(|(_, id)| id);
}

pub fn picking(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cam_q: Query<(&Camera, &GlobalTransform)>,
    mut contexts: EguiContexts,
    st: Res<GraphState>,
    mut out: EventWriter<Picked>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if contexts.ctx_mut().wants_pointer_input() {
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };

    let mut best: Option<(f32, EventId)> = None;
    for (id, pos) in st.positions.iter() {
        let Some(screen) = camera.world_to_viewport(cam_tf, *pos) else {
            continue;
        };
        let d = screen.distance(cursor);
        if d < 14.0 && best.as_ref().map(|(bd, _)| d < *bd).unwrap_or(true) {
            best = Some((d, id.clone()));
        }
    }
    if let Some((_, picked)) = best {
        out.send(Picked(picked));
    }
}

pub fn apply_picked(
    mut st: ResMut<GraphState>,
    mut ev: EventReader<Picked>,
    tx: Res<NetTx>,
) {
    for Picked(id) in ev.read() {
        st.select_event(id.clone(), &tx.0);
    }
}

pub fn draw_graph(
    mut commands: Commands,
    st: Res<GraphState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(Entity, &NodeMarker)>,
    mut gizmos: Gizmos,
    mut contexts: EguiContexts,
) {
    if let Some(hovered) = st.ui.hovered.clone() {
        let pos = contexts
            .ctx_mut()
            .input(|i| i.pointer.hover_pos().unwrap_or(egui::pos2(0.0, 0.0)))
            + egui::vec2(14.0, 14.0);
        render_tooltip(
            contexts.ctx_mut(),
            "tooltip_node",
            pos,
            st.node_tooltip_lines(&hovered),
        );
    }

    if st.needs_redraw.swap(false, Ordering::Relaxed) {
        for (e, _) in query.iter_mut() {
            commands.entity(e).despawn_recursive();
        }

        let sphere = meshes.add(Sphere::new(SPHERE_RADIUS));
        let mat_selected = mats.add(StandardMaterial {
            emissive: Color::srgb(1.0, 1.0, 1.0).into(),
            ..default()
        });
        let mut group_mats: HashMap<i64, Handle<StandardMaterial>> = HashMap::new();

        for event in st.model.graph.events() {
            let Some(pos) = st.positions.get(&event.id).cloned() else {
                continue;
            };
            let material = if st.ui.selected.as_ref() == Some(&event.id) {
                mat_selected.clone()
            } else {
                group_mats
                    .entry(event.state_group)
                    .or_insert_with(|| {
                        mats.add(StandardMaterial {
                            base_color: group_color(event.state_group),
                            ..default()
                        })
                    })
                    .clone()
            };

            commands.spawn((
                PbrBundle {
                    mesh: sphere.clone(),
                    material,
                    transform: Transform::from_translation(pos),
                    ..default()
                },
                NodeMarker,
            ));
        }
    }

    if st.cfg.show_edges {
        for event in st.model.graph.events() {
            let Some(child) = st.positions.get(&event.id) else {
                continue;
            };
            for parent_id in &event.edges {
                // edges into events outside the batch are not drawn
                let Some(parent) = st.positions.get(parent_id) else {
                    continue;
                };
                let color = if st.ui.selected.as_ref() == Some(&event.id)
                    || st.ui.selected.as_ref() == Some(parent_id)
                {
                    Color::WHITE
                } else {
                    EDGE_COLOR
                };
                draw_arrow(&mut gizmos, *child, *parent, color);
            }
        }
    }
}

/// Child → parent line with a small head at the parent end.
fn draw_arrow(gizmos: &mut Gizmos, from: Vec3, to: Vec3, color: Color) {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec3::ZERO {
        return;
    }
    let tip = to - dir * (SPHERE_RADIUS + 0.05);
    gizmos.line(from, tip, color);

    let side = dir.cross(Vec3::Z).normalize_or_zero() * 0.12;
    gizmos.line(tip, tip - dir * 0.25 + side, color);
    gizmos.line(tip, tip - dir * 0.25 - side, color);
}

/// Stable per-state-group hue so groups cluster visually across loads.
fn group_color(state_group: i64) -> Color {
    let hue = (stable_u32(&state_group.to_string()) % 360) as f32;
    Color::hsl(hue, 0.55, 0.6)
}
