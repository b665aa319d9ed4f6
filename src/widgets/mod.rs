//! Widget sessions
//!
//! Each widget owns its own state and exposes explicit transitions plus a
//! serializable view. Nothing here schedules work or performs I/O.

pub mod countdown;
pub mod guessing;
pub mod input;
pub mod joke;
pub mod tip;

pub use countdown::{format_time, CountdownPhase, CountdownSession, CountdownView, TickOutcome};
pub use guessing::{GuessOutcome, GuessingPhase, GuessingSession, GuessingView};
pub use joke::{Joke, JokeBoard, JokeError, JokeSource, JokeView, FETCH_FAILED_MESSAGE};
pub use tip::{compute_tip, TipBreakdown, TipCalculator, TipView};
