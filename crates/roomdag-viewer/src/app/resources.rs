use bevy::prelude::Resource;
use crossbeam_channel::Receiver;
use tokio::sync::mpsc::UnboundedSender;

use crate::net::{Command, Incoming};

#[derive(Resource)]
pub struct NetRx(pub Receiver<Incoming>);

#[derive(Resource)]
pub struct NetTx(pub UnboundedSender<Command>);
