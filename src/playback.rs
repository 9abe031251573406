//! Playback of a precomputed sequence.
//!
//! [`Playback`] is the single source of truth for the current step;
//! [`Ticker`] only emits [`Advance`] events on a fixed interval,
//! which the owner turns into [`Intent::Tick`].

mod state;
mod ticker;

pub use state::{Playback, Intent, EndBehavior};
pub use ticker::{Ticker, Advance};
