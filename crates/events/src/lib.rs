//! Domain events and the handler seam that reacts to them.

pub mod event;
pub mod handler;

pub use event::Event;
pub use handler::EventHandler;
