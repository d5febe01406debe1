//! Shared catalog logic for the program download site.
//!
//! Everything here is target-independent: the program record model, the
//! search filter, the dialog and admin-session state machines, the
//! write-then-reload sync operations, and the wire codecs for the hosted
//! document store and identity service. The web front end only adds DOM
//! rendering and browser adapters on top.

pub mod backend;
pub mod catalog;
pub mod dialog;
pub mod error;
pub mod link;
pub mod memory;
pub mod search;
pub mod session;
pub mod state;
pub mod sync;
pub mod types;
pub mod view;
pub mod wire;
