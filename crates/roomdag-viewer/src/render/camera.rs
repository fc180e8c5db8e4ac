use bevy::prelude::*;

use crate::graph::GraphState;

pub fn setup_scene(mut commands: Commands) {
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 5000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(10.0, 20.0, 10.0),
        ..default()
    });

    commands.spawn(Camera3dBundle {
        transform: Transform::from_xyz(0.0, 8.0, 28.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });
}

pub fn apply_jump_to(mut st: ResMut<GraphState>, mut cam_q: Query<&mut Transform, With<Camera>>) {
    if st.ui.fit_to_view {
        st.ui.fit_to_view = false;

        let mut min = Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        let mut max = Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);
        for pos in st.positions.values() {
            min = min.min(*pos);
            max = max.max(*pos);
        }

        if min.x.is_finite() {
            let Ok(mut cam_tf) = cam_q.get_single_mut() else {
                return;
            };
            let center = (min + max) * 0.5;
            let extent = (max.x - min.x).max(max.y - min.y).max(1.0);
            let dist = extent.max(8.0);
            cam_tf.translation = center + Vec3::new(0.0, 0.0, dist);
            cam_tf.look_at(center, Vec3::Y);
        }
    }

    let Some(id) = st.ui.jump_to.take() else {
        return;
    };
    let Some(target) = st.positions.get(&id).cloned() else {
        return;
    };

    let Ok(mut cam_tf) = cam_q.get_single_mut() else {
        return;
    };
    let dist = (cam_tf.translation - target).length().clamp(8.0, 24.0);
    cam_tf.translation = target + Vec3::new(0.0, 0.0, dist);
    cam_tf.look_at(target, Vec3::Y);
}
