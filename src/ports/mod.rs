//! Ports (trait boundaries) for external dependencies.
//!
//! The learning core owns these traits; persistence formats and training
//! reporters implement them in [`crate::adapters`] and [`crate::pipeline`].

pub mod observer;
pub mod repository;

pub use observer::Observer;
pub use repository::ValueTableRepository;
