//! Worker tasks that back the runtime orchestration.
//!
//! A single spell worker owns the [`crate::SpellService`]; every mutation is
//! funnelled through its command channel.

mod spell;

pub use spell::{Command, SpellWorker};
