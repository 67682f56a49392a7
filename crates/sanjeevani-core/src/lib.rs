//! Core domain engine for the Sanjeevani donor-relay network.
//!
//! This crate is deliberately free of HTTP, I/O, and logging. All mutation
//! flows through [`coordinator::RelayCoordinator`]; collaborators observe the
//! engine through the typed snapshots it returns and the domain events it
//! publishes to an [`event::EventSink`].

pub mod activity;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod guardian;
pub mod ledger;
pub mod month;
pub mod patient;
pub mod progression;
pub mod screening;
pub mod slot;

pub use error::{Error, ErrorKind, Result};
