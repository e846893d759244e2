//! Application-record domain: the one durable entity the assistant mutates.
//!
//! A record tracks which of the four required document slots have been
//! verified, and derives progress and status from that map. Records are
//! read-modify-written as whole documents through the [`ApplicationStore`]
//! port.

pub mod domain;
pub mod roster;
pub mod status;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationRecord, ApplicationStatus, DocumentEntry, DocumentSlot, DocumentState,
};
pub use roster::{seed_defaults, seed_store, RosterImportError, RosterImporter};
pub use status::render_status;
pub use store::{ApplicationStore, StoreError};
