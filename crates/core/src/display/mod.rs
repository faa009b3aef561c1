//! Display note tree building.

mod author;
mod boost;
mod note;
mod thread;

pub use author::resolve_author;
pub use boost::{AnnounceParams, boost_summary, first_announcer};
pub use note::{DisplayNote, count_replies, order_siblings};
pub use thread::{IngestSummary, Placement, Thread};
