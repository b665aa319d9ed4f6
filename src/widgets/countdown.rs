//! Countdown session state machine
//!
//! Pure state only. Scheduling the recurring tick lives in
//! [`crate::state::CountdownTimer`], which drives [`CountdownSession::tick`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WidgetError;

const WIDGET: &str = "countdown";

/// Lifecycle of a countdown session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownPhase {
    /// No duration set yet
    Idle,
    /// Duration set, full value shown, not counting
    Ready,
    Running,
    Paused,
    /// Reached zero; only `set` or `reset` leave this phase
    Expired,
}

impl fmt::Display for CountdownPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Expired => "expired",
        };
        f.write_str(name)
    }
}

/// Result of applying one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running, keep ticking
    Continue,
    /// Hit zero on this tick; the tick source must stop
    Expired,
    /// Not running, nothing changed
    Idle,
}

/// Countdown state owned by one timer widget
#[derive(Debug, Clone)]
pub struct CountdownSession {
    phase: CountdownPhase,
    remaining_seconds: u64,
    duration_seconds: Option<u64>,
}

impl CountdownSession {
    pub fn new() -> Self {
        Self {
            phase: CountdownPhase::Idle,
            remaining_seconds: 0,
            duration_seconds: None,
        }
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn duration_seconds(&self) -> Option<u64> {
        self.duration_seconds
    }

    pub fn is_running(&self) -> bool {
        self.phase == CountdownPhase::Running
    }

    /// Set a new duration and show it at full value
    pub fn set(&mut self, duration_seconds: u64) -> Result<(), WidgetError> {
        if duration_seconds == 0 {
            return Err(WidgetError::invalid_input(
                "duration",
                "must be a positive number of seconds",
            ));
        }
        self.duration_seconds = Some(duration_seconds);
        self.remaining_seconds = duration_seconds;
        self.phase = CountdownPhase::Ready;
        Ok(())
    }

    /// Begin or resume counting down
    pub fn start(&mut self) -> Result<(), WidgetError> {
        match self.phase {
            CountdownPhase::Ready | CountdownPhase::Paused if self.remaining_seconds > 0 => {
                self.phase = CountdownPhase::Running;
                Ok(())
            }
            phase => Err(WidgetError::invalid_transition(WIDGET, "start", phase)),
        }
    }

    /// Freeze the remaining time
    pub fn pause(&mut self) -> Result<(), WidgetError> {
        if self.phase != CountdownPhase::Running {
            return Err(WidgetError::invalid_transition(WIDGET, "pause", self.phase));
        }
        self.phase = CountdownPhase::Paused;
        Ok(())
    }

    /// Go back to the last set duration, or to idle if none was ever set
    pub fn reset(&mut self) {
        match self.duration_seconds {
            Some(duration) => {
                self.remaining_seconds = duration;
                self.phase = CountdownPhase::Ready;
            }
            None => {
                self.remaining_seconds = 0;
                self.phase = CountdownPhase::Idle;
            }
        }
    }

    /// Apply one elapsed period
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != CountdownPhase::Running {
            return TickOutcome::Idle;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = CountdownPhase::Expired;
            TickOutcome::Expired
        } else {
            TickOutcome::Continue
        }
    }

    pub fn view(&self) -> CountdownView {
        CountdownView {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            duration_seconds: self.duration_seconds,
            display: format_time(self.remaining_seconds),
            start_label: start_label(self.phase).to_string(),
        }
    }
}

impl Default for CountdownSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Rendered countdown widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownView {
    pub phase: CountdownPhase,
    pub remaining_seconds: u64,
    pub duration_seconds: Option<u64>,
    pub display: String,
    pub start_label: String,
}

fn start_label(phase: CountdownPhase) -> &'static str {
    if phase == CountdownPhase::Paused { "Resume" } else { "Start" }
}

/// Render seconds as `MM:SS`; minutes are not wrapped at 60
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(duration: u64) -> CountdownSession {
        let mut session = CountdownSession::new();
        session.set(duration).unwrap();
        session.start().unwrap();
        session
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(125), "02:05");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(6000), "100:00");
    }

    #[test]
    fn set_shows_full_duration() {
        for duration in [1, 2, 60, 125, 3601] {
            let mut session = CountdownSession::new();
            session.set(duration).unwrap();
            assert_eq!(session.remaining_seconds(), duration);
            assert_eq!(session.phase(), CountdownPhase::Ready);
        }
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut session = CountdownSession::new();
        assert!(session.set(0).is_err());
        assert_eq!(session.phase(), CountdownPhase::Idle);
        assert_eq!(session.duration_seconds(), None);
    }

    #[test]
    fn start_requires_a_duration() {
        let mut session = CountdownSession::new();
        assert!(session.start().is_err());
        assert_eq!(session.phase(), CountdownPhase::Idle);
    }

    #[test]
    fn second_start_while_running_is_rejected() {
        let mut session = running(5);
        assert!(session.start().is_err());
        assert!(session.is_running());
    }

    #[test]
    fn ticks_decrement_until_expired() {
        let mut session = running(3);
        assert_eq!(session.tick(), TickOutcome::Continue);
        assert_eq!(session.remaining_seconds(), 2);
        assert_eq!(session.tick(), TickOutcome::Continue);
        assert_eq!(session.tick(), TickOutcome::Expired);
        assert_eq!(session.remaining_seconds(), 0);
        assert_eq!(session.phase(), CountdownPhase::Expired);

        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.remaining_seconds(), 0);
        assert!(session.start().is_err());
    }

    #[test]
    fn pause_freezes_and_start_resumes() {
        let mut session = running(10);
        session.tick();
        session.pause().unwrap();
        assert_eq!(session.view().start_label, "Resume");

        for _ in 0..5 {
            assert_eq!(session.tick(), TickOutcome::Idle);
        }
        assert_eq!(session.remaining_seconds(), 9);

        session.start().unwrap();
        session.tick();
        assert_eq!(session.remaining_seconds(), 8);
    }

    #[test]
    fn pause_only_from_running() {
        let mut session = CountdownSession::new();
        session.set(4).unwrap();
        let err = session.pause().unwrap_err();
        assert_eq!(err.to_string(), "Cannot pause the countdown while it is ready");
    }

    #[test]
    fn reset_restores_last_duration() {
        let mut session = running(4);
        session.tick();
        session.tick();
        session.reset();
        assert_eq!(session.phase(), CountdownPhase::Ready);
        assert_eq!(session.remaining_seconds(), 4);

        let mut idle = CountdownSession::new();
        idle.reset();
        assert_eq!(idle.phase(), CountdownPhase::Idle);
        assert_eq!(idle.view().display, "00:00");
    }

    #[test]
    fn remaining_never_exceeds_duration() {
        let mut session = running(2);
        for _ in 0..10 {
            session.tick();
            assert!(session.remaining_seconds() <= session.duration_seconds().unwrap());
        }
        session.reset();
        assert_eq!(session.remaining_seconds(), 2);
    }
}
