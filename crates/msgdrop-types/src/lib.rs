//! Types shared between the message store and the HTTP adapter.
//!
//! Nothing in here touches storage or the network; the store speaks in
//! `Reply` and `Rejection`, the adapter turns those into `Envelope`s.

pub mod api;
pub mod errors;
pub mod models;

pub use errors::{Outcome, Rejection};
pub use models::{MessageRecord, Priority, UserId};
