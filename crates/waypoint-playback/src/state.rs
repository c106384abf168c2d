//! Immutable playback state value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlaybackError, Result};

/// Current mode of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// At step 0 (or nothing loaded), not advancing
    Stopped,
    /// Advancing automatically on a timer
    Playing,
    /// Halted mid-sequence
    Paused,
}

/// An immutable snapshot of where playback stands.
///
/// Invariant: with no steps loaded (`total_steps == 0`) the index is the −1
/// sentinel; otherwise `0 <= current_step_index < total_steps`. Every
/// transition produces a new value, the [`Player`](crate::Player) never
/// mutates one in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    current_step_index: isize,
    total_steps: usize,
    status: PlaybackStatus,
    speed: f64,
}

impl PlaybackState {
    /// Create a state, validating the index invariant and that speed is
    /// positive.
    pub fn new(
        current_step_index: isize,
        total_steps: usize,
        status: PlaybackStatus,
        speed: f64,
    ) -> Result<Self> {
        if speed <= 0.0 || !speed.is_finite() {
            return Err(PlaybackError::InvalidSpeed(speed));
        }
        let valid = if total_steps == 0 {
            current_step_index == -1
        } else {
            current_step_index >= 0 && (current_step_index as usize) < total_steps
        };
        if !valid {
            return Err(PlaybackError::IndexOutOfRange {
                index: current_step_index,
                total: total_steps,
            });
        }
        Ok(Self {
            current_step_index,
            total_steps,
            status,
            speed,
        })
    }

    /// Construct from values the caller already knows to be valid.
    pub(crate) fn new_unchecked(
        current_step_index: isize,
        total_steps: usize,
        status: PlaybackStatus,
        speed: f64,
    ) -> Self {
        debug_assert!(Self::new(current_step_index, total_steps, status, speed).is_ok());
        Self {
            current_step_index,
            total_steps,
            status,
            speed,
        }
    }

    /// The no-algorithm sentinel state: index −1, stopped, speed 1.
    pub fn initial() -> Self {
        Self {
            current_step_index: -1,
            total_steps: 0,
            status: PlaybackStatus::Stopped,
            speed: 1.0,
        }
    }

    /// Copy with a different step index.
    pub fn with_step_index(&self, index: isize) -> Result<Self> {
        Self::new(index, self.total_steps, self.status, self.speed)
    }

    /// Copy with a different status.
    pub fn with_status(&self, status: PlaybackStatus) -> Self {
        Self {
            status,
            ..*self
        }
    }

    /// Copy with a different speed multiplier.
    pub fn with_speed(&self, speed: f64) -> Result<Self> {
        Self::new(self.current_step_index, self.total_steps, self.status, speed)
    }

    /// Index of the current step, −1 when nothing is loaded.
    pub fn current_step_index(&self) -> isize {
        self.current_step_index
    }

    /// Number of steps in the loaded sequence, 0 when nothing is loaded.
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Current playback status.
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Speed multiplier, always positive.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Whether a step sequence is loaded.
    pub fn has_algorithm(&self) -> bool {
        self.total_steps > 0
    }

    /// At the first step of a loaded sequence.
    pub fn is_at_start(&self) -> bool {
        self.has_algorithm() && self.current_step_index == 0
    }

    /// At the last step of a loaded sequence.
    pub fn is_at_end(&self) -> bool {
        self.has_algorithm() && self.current_step_index == self.total_steps as isize - 1
    }

    /// Whether stepping forward would move.
    pub fn can_step_forward(&self) -> bool {
        self.has_algorithm() && !self.is_at_end()
    }

    /// Whether stepping backward would move.
    pub fn can_step_backward(&self) -> bool {
        self.has_algorithm() && self.current_step_index > 0
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.status == PlaybackStatus::Paused
    }

    pub fn is_stopped(&self) -> bool {
        self.status == PlaybackStatus::Stopped
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.has_algorithm() {
            self.current_step_index + 1
        } else {
            0
        };
        write!(
            f,
            "step {}/{}, {:?}, speed {}x",
            shown, self.total_steps, self.status, self.speed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_is_empty_sentinel() {
        let state = PlaybackState::initial();
        assert_eq!(state.current_step_index(), -1);
        assert_eq!(state.total_steps(), 0);
        assert!(state.is_stopped());
        assert!(!state.has_algorithm());
        assert!(!state.can_step_forward());
        assert!(!state.can_step_backward());
    }

    #[test]
    fn index_invariant_enforced() {
        // Empty sequence requires the -1 sentinel
        assert!(PlaybackState::new(-1, 0, PlaybackStatus::Stopped, 1.0).is_ok());
        assert!(matches!(
            PlaybackState::new(0, 0, PlaybackStatus::Stopped, 1.0),
            Err(PlaybackError::IndexOutOfRange { .. })
        ));

        // Loaded sequence requires an in-range index
        assert!(PlaybackState::new(0, 3, PlaybackStatus::Stopped, 1.0).is_ok());
        assert!(PlaybackState::new(2, 3, PlaybackStatus::Stopped, 1.0).is_ok());
        assert!(PlaybackState::new(-1, 3, PlaybackStatus::Stopped, 1.0).is_err());
        assert!(PlaybackState::new(3, 3, PlaybackStatus::Stopped, 1.0).is_err());
    }

    #[test]
    fn speed_must_be_positive() {
        assert!(matches!(
            PlaybackState::new(-1, 0, PlaybackStatus::Stopped, 0.0),
            Err(PlaybackError::InvalidSpeed(_))
        ));
        assert!(PlaybackState::initial().with_speed(-1.0).is_err());
        assert!(PlaybackState::initial().with_speed(f64::NAN).is_err());
    }

    #[test]
    fn bounds_helpers() {
        let start = PlaybackState::new(0, 3, PlaybackStatus::Paused, 1.0).unwrap();
        assert!(start.is_at_start());
        assert!(!start.is_at_end());
        assert!(start.can_step_forward());
        assert!(!start.can_step_backward());

        let end = start.with_step_index(2).unwrap();
        assert!(end.is_at_end());
        assert!(!end.can_step_forward());
        assert!(end.can_step_backward());
    }

    #[test]
    fn transitions_produce_new_values() {
        let state = PlaybackState::new(1, 3, PlaybackStatus::Stopped, 1.0).unwrap();
        let playing = state.with_status(PlaybackStatus::Playing);

        assert!(state.is_stopped());
        assert!(playing.is_playing());
        assert_eq!(playing.current_step_index(), 1);

        let fast = playing.with_speed(2.0).unwrap();
        assert_eq!(fast.speed(), 2.0);
        assert_eq!(playing.speed(), 1.0);
    }

    #[test]
    fn serialization_roundtrip() {
        let state = PlaybackState::new(1, 4, PlaybackStatus::Playing, 2.5).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let parsed: PlaybackState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
