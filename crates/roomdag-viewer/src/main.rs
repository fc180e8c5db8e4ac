mod app;
mod graph;
mod net;
mod render;
mod ui;
mod util;

use anyhow::Result;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::app::resources::{NetRx, NetTx};
use crate::app::RoomDagViewerPlugin;
use crate::net::Command;
use crate::util::{args, config};

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let cfg = config::load_or_default();
    let request = args::parse_args(&cfg)?;

    let (tx, rx) = crossbeam_channel::unbounded();
    let commands = net::spawn_client(request.base_url.clone(), tx);
    let _ = commands.send(Command::FetchRoom {
        room_id: request.room_id.clone(),
        max_stream: request.max_stream,
    });

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "RoomDAG".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .add_plugins(RoomDagViewerPlugin { cfg, request })
        .insert_resource(NetRx(rx))
        .insert_resource(NetTx(commands))
        .run();

    Ok(())
}
