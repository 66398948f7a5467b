// Service module exports

pub mod event;
pub mod layout;
pub mod settings;
pub mod snapshot;
