//! Data models for linkdeck.
//!
//! This module contains the link record types shared by storage, services
//! and rendering.

mod form;
mod link;

pub use form::LinkForm;
pub use link::{LinkId, LinkInput, LinkPatch, LinkRecord};
