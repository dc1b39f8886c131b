//! Storage backend traits.

mod durable;

pub use durable::{DurableStore, MAX_KEY_LEN, validate_key};
