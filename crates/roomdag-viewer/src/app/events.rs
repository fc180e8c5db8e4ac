use bevy::prelude::Event;
use roomdag_core::EventId;

#[derive(Event)]
pub struct Picked(pub EventId);
