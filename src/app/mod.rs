//! Demo application: state, events, and the buttons it shows.

pub mod buttons;
pub mod event;
pub mod handler;
pub mod state;
