//! Number guessing session

use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::WidgetError;

const WIDGET: &str = "guessing game";

/// Range the hidden number is drawn from
pub const TARGET_RANGE: RangeInclusive<u64> = 1..=10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessingPhase {
    NotStarted,
    Playing,
    /// Guesses are not accepted until resumed
    Paused,
    /// Target found; only `start` or `try_again` leave this phase
    Won,
}

impl fmt::Display for GuessingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not started",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Won => "won",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessOutcome {
    Correct,
    Wrong,
}

#[derive(Debug, Clone)]
pub struct GuessingSession {
    phase: GuessingPhase,
    target: Option<u64>,
    attempts: u32,
}

impl GuessingSession {
    pub fn new() -> Self {
        Self {
            phase: GuessingPhase::NotStarted,
            target: None,
            attempts: 0,
        }
    }

    pub fn phase(&self) -> GuessingPhase {
        self.phase
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn target(&self) -> Option<u64> {
        self.target
    }

    /// Start (or restart) with a fresh target from the thread RNG
    pub fn start(&mut self) -> u64 {
        self.start_with(&mut rand::thread_rng())
    }

    /// Start (or restart) drawing the target from `rng`
    pub fn start_with<R: Rng>(&mut self, rng: &mut R) -> u64 {
        let target = rng.gen_range(TARGET_RANGE);
        self.target = Some(target);
        self.attempts = 0;
        self.phase = GuessingPhase::Playing;
        target
    }

    pub fn guess(&mut self, value: u64) -> Result<GuessOutcome, WidgetError> {
        if self.phase != GuessingPhase::Playing {
            return Err(WidgetError::invalid_transition(WIDGET, "guess in", self.phase));
        }
        if self.target == Some(value) {
            self.phase = GuessingPhase::Won;
            Ok(GuessOutcome::Correct)
        } else {
            self.attempts += 1;
            Ok(GuessOutcome::Wrong)
        }
    }

    pub fn pause(&mut self) -> Result<(), WidgetError> {
        if self.phase != GuessingPhase::Playing {
            return Err(WidgetError::invalid_transition(WIDGET, "pause", self.phase));
        }
        self.phase = GuessingPhase::Paused;
        Ok(())
    }

    /// Accept guesses again; the target is kept
    pub fn resume(&mut self) -> Result<(), WidgetError> {
        if self.phase != GuessingPhase::Paused {
            return Err(WidgetError::invalid_transition(WIDGET, "resume", self.phase));
        }
        self.phase = GuessingPhase::Playing;
        Ok(())
    }

    /// Back to the pre-start state
    pub fn try_again(&mut self) {
        *self = Self::new();
    }

    pub fn view(&self) -> GuessingView {
        let won = self.phase == GuessingPhase::Won;
        GuessingView {
            phase: self.phase,
            attempts: self.attempts,
            revealed_target: if won { self.target } else { None },
            summary: won
                .then(|| format!("You guessed the number in {} attempts.", self.attempts)),
        }
    }
}

impl Default for GuessingSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Rendered guessing widget; the target stays hidden until the game is won
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessingView {
    pub phase: GuessingPhase,
    pub attempts: u32,
    pub revealed_target: Option<u64>,
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn started(seed: u64) -> (GuessingSession, u64) {
        let mut session = GuessingSession::new();
        let target = session.start_with(&mut StdRng::seed_from_u64(seed));
        (session, target)
    }

    #[test]
    fn targets_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = GuessingSession::new();
        for _ in 0..500 {
            let target = session.start_with(&mut rng);
            assert!(TARGET_RANGE.contains(&target));
            assert_eq!(session.target(), Some(target));
        }
    }

    #[test]
    fn correct_guess_wins_without_counting() {
        for seed in 0..20 {
            let (mut session, target) = started(seed);
            let wrong = if target == 10 { 1 } else { target + 1 };
            session.guess(wrong).unwrap();
            assert_eq!(session.guess(target).unwrap(), GuessOutcome::Correct);
            assert_eq!(session.phase(), GuessingPhase::Won);
            assert_eq!(session.attempts(), 1);
        }
    }

    #[test]
    fn wrong_guess_counts_one_attempt() {
        let (mut session, target) = started(3);
        for (i, guess) in (1..=10).filter(|g| *g != target).enumerate() {
            assert_eq!(session.guess(guess).unwrap(), GuessOutcome::Wrong);
            assert_eq!(session.attempts(), i as u32 + 1);
            assert_eq!(session.phase(), GuessingPhase::Playing);
        }
    }

    #[test]
    fn out_of_range_guess_is_just_wrong() {
        let (mut session, _) = started(11);
        assert_eq!(session.guess(0).unwrap(), GuessOutcome::Wrong);
        assert_eq!(session.guess(42).unwrap(), GuessOutcome::Wrong);
        assert_eq!(session.attempts(), 2);
    }

    #[test]
    fn paused_game_rejects_guesses_and_keeps_target() {
        let (mut session, target) = started(5);
        session.guess(if target == 1 { 2 } else { 1 }).unwrap();
        session.pause().unwrap();

        assert!(session.guess(target).is_err());
        assert_eq!(session.attempts(), 1);

        session.resume().unwrap();
        assert_eq!(session.target(), Some(target));
        assert_eq!(session.attempts(), 1);
        assert_eq!(session.guess(target).unwrap(), GuessOutcome::Correct);
    }

    #[test]
    fn guesses_before_start_or_after_win_are_rejected() {
        let mut session = GuessingSession::new();
        assert!(session.guess(5).is_err());
        assert_eq!(session.attempts(), 0);

        let (mut won, target) = started(9);
        won.guess(target).unwrap();
        assert!(won.guess(target).is_err());
        assert!(won.pause().is_err());
    }

    #[test]
    fn view_hides_target_until_won() {
        let (mut session, target) = started(1);
        assert_eq!(session.view().revealed_target, None);
        assert_eq!(session.view().summary, None);

        session.guess(target).unwrap();
        let view = session.view();
        assert_eq!(view.revealed_target, Some(target));
        assert_eq!(
            view.summary.as_deref(),
            Some("You guessed the number in 0 attempts.")
        );
    }

    #[test]
    fn try_again_clears_everything() {
        let (mut session, target) = started(2);
        session.guess(target).unwrap();
        session.try_again();
        assert_eq!(session.phase(), GuessingPhase::NotStarted);
        assert_eq!(session.target(), None);
        assert_eq!(session.attempts(), 0);
    }

    #[test]
    fn restart_resets_attempts() {
        let (mut session, target) = started(4);
        session.guess(if target == 1 { 2 } else { 1 }).unwrap();
        session.start_with(&mut StdRng::seed_from_u64(40));
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.phase(), GuessingPhase::Playing);
    }
}
