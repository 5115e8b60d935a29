//! Input event vocabulary.
//!
//! Backends translate their native keyboard and mouse events into
//! [`InputEvent`]s; the frame pump routes them to windows, which keep the last
//! unconsumed click and key for the polling queries.

pub mod events;

pub use events::{InputEvent, Key, MouseButton};
