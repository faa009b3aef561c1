//! `ActivityPub` activity types.

#![allow(missing_docs)]

mod activity;
mod instrument;
mod queue;

pub use activity::{Activity, ActivityObject, ActivityVerb};
pub use instrument::{Instrument, InstrumentKind};
pub use queue::{QueueItem, QueueItemKind, VaultedMessage};
