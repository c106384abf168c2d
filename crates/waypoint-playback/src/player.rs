//! Playback state machine over a recorded search run.
//!
//! The player owns an [`AlgorithmResult`] and walks its step sequence under
//! caller control (play/pause/step/reset) or on a timer while playing.
//! Listeners receive the current step and state after every transition.
//!
//! Concurrency model: operations read-modify-write the state under one lock
//! and are meant to be driven by a single logical owner. The timer is a
//! spawned task that re-checks an epoch counter and the `Playing` status on
//! every tick, so a pause or stop that races a pending tick simply voids it.
//! `play` needs a Tokio runtime; every other operation is runtime-free.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{trace, warn};
use waypoint_search::{AlgorithmResult, AlgorithmStep};

use crate::error::{PlaybackError, Result};
use crate::state::{PlaybackState, PlaybackStatus};

/// Interval between automatic steps at speed 1.0.
pub const BASE_STEP_INTERVAL: Duration = Duration::from_millis(800);

/// Fastest allowed speed multiplier.
pub const MAX_SPEED: f64 = 5.0;

/// Callback invoked with the step that playback moved to.
pub type StepListener = Arc<dyn Fn(&AlgorithmStep) + Send + Sync>;

/// Callback invoked with the playback state after a transition.
pub type StateListener = Arc<dyn Fn(&PlaybackState) + Send + Sync>;

/// Identifies a registered listener for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Drives playback of one loaded [`AlgorithmResult`].
pub struct Player {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    result: Option<AlgorithmResult>,
    state: PlaybackState,
    /// Bumped whenever automatic playback must stop; a ticker task exits as
    /// soon as its captured epoch no longer matches.
    epoch: u64,
    base_interval: Duration,
    step_listeners: Vec<(ListenerId, StepListener)>,
    state_listeners: Vec<(ListenerId, StateListener)>,
    next_listener_id: u64,
}

/// Notifications queued under the lock and delivered after it is released,
/// in order, so a listener can call back into the player.
enum Notice {
    State(PlaybackState),
    Step(AlgorithmStep),
}

struct Pending {
    notices: Vec<Notice>,
    step_listeners: Vec<StepListener>,
    state_listeners: Vec<StateListener>,
}

impl Pending {
    fn capture(inner: &Inner) -> Self {
        Self {
            notices: Vec::new(),
            step_listeners: inner.step_listeners.iter().map(|(_, l)| Arc::clone(l)).collect(),
            state_listeners: inner.state_listeners.iter().map(|(_, l)| Arc::clone(l)).collect(),
        }
    }

    fn state(&mut self, state: PlaybackState) {
        self.notices.push(Notice::State(state));
    }

    fn step(&mut self, step: AlgorithmStep) {
        self.notices.push(Notice::Step(step));
    }

    /// Invoke every listener. A panicking listener is contained and must not
    /// stop delivery to the rest.
    fn deliver(self) {
        for notice in &self.notices {
            match notice {
                Notice::State(state) => {
                    for listener in &self.state_listeners {
                        if catch_unwind(AssertUnwindSafe(|| listener(state))).is_err() {
                            warn!("state listener panicked during notification");
                        }
                    }
                }
                Notice::Step(step) => {
                    for listener in &self.step_listeners {
                        if catch_unwind(AssertUnwindSafe(|| listener(step))).is_err() {
                            warn!("step listener panicked during notification");
                        }
                    }
                }
            }
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Create a player with the default 800 ms base interval.
    pub fn new() -> Self {
        Self::with_base_interval(BASE_STEP_INTERVAL)
    }

    /// Create a player with a custom base interval between automatic steps.
    pub fn with_base_interval(base_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                result: None,
                state: PlaybackState::initial(),
                epoch: 0,
                base_interval,
                step_listeners: Vec::new(),
                state_listeners: Vec::new(),
                next_listener_id: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Listeners run outside the lock, so a panic can never poison it;
        // recover the guard if some other path ever does.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load a result for playback. Fails if it has zero steps.
    ///
    /// Stops any active playback, rewinds to step 0 with status `Stopped`,
    /// keeps the current speed, then notifies state listeners followed by
    /// step listeners with step 0.
    pub fn load(&self, result: AlgorithmResult) -> Result<()> {
        if result.step_count() == 0 {
            return Err(PlaybackError::EmptyResult);
        }
        let pending = {
            let mut inner = self.lock();
            inner.epoch += 1;
            inner.state = PlaybackState::new_unchecked(
                0,
                result.step_count(),
                PlaybackStatus::Stopped,
                inner.state.speed(),
            );
            inner.result = Some(result);
            trace!(total_steps = inner.state.total_steps(), "loaded result");

            let mut pending = Pending::capture(&inner);
            pending.state(inner.state);
            if let Some(step) = inner.current_step_cloned() {
                pending.step(step);
            }
            pending
        };
        pending.deliver();
        Ok(())
    }

    /// Whether a result is loaded.
    pub fn has_algorithm(&self) -> bool {
        self.lock().result.is_some()
    }

    /// Start automatic forward playback. No-op when nothing is loaded or
    /// already playing. From the last step, rewinds to step 0 first.
    pub fn play(&self) {
        let (pending, ticker) = {
            let mut inner = self.lock();
            if inner.result.is_none() || inner.state.is_playing() {
                return;
            }
            let mut pending = Pending::capture(&inner);
            if inner.state.is_at_end() {
                inner.state = PlaybackState::new_unchecked(
                    0,
                    inner.state.total_steps(),
                    PlaybackStatus::Stopped,
                    inner.state.speed(),
                );
                pending.state(inner.state);
                if let Some(step) = inner.current_step_cloned() {
                    pending.step(step);
                }
            }
            inner.state = inner.state.with_status(PlaybackStatus::Playing);
            pending.state(inner.state);
            inner.epoch += 1;
            trace!(epoch = inner.epoch, "playback started");
            (pending, (Arc::clone(&self.inner), inner.epoch))
        };
        pending.deliver();
        let (inner, epoch) = ticker;
        tokio::spawn(run_ticker(inner, epoch));
    }

    /// Halt automatic playback. No-op unless currently playing.
    pub fn pause(&self) {
        let pending = {
            let mut inner = self.lock();
            if !inner.state.is_playing() {
                return;
            }
            inner.epoch += 1;
            inner.state = inner.state.with_status(PlaybackStatus::Paused);
            trace!("playback paused");
            let mut pending = Pending::capture(&inner);
            pending.state(inner.state);
            pending
        };
        pending.deliver();
    }

    /// Halt playback and rewind to step 0. With nothing loaded, returns to
    /// the empty sentinel state.
    pub fn stop(&self) {
        let pending = {
            let mut inner = self.lock();
            inner.epoch += 1;
            let mut pending = Pending::capture(&inner);
            match &inner.result {
                None => {
                    inner.state = PlaybackState::initial();
                    pending.state(inner.state);
                }
                Some(_) => {
                    inner.state = PlaybackState::new_unchecked(
                        0,
                        inner.state.total_steps(),
                        PlaybackStatus::Stopped,
                        inner.state.speed(),
                    );
                    pending.state(inner.state);
                    if let Some(step) = inner.current_step_cloned() {
                        pending.step(step);
                    }
                }
            }
            trace!("playback stopped");
            pending
        };
        pending.deliver();
    }

    /// Alias for [`stop`](Self::stop).
    pub fn reset(&self) {
        self.stop();
    }

    /// Advance by one step, pausing first if playing. No-op when nothing is
    /// loaded or already at the last step.
    pub fn step_forward(&self) {
        self.manual_step(1);
    }

    /// Go back one step, pausing first if playing. No-op when nothing is
    /// loaded or already at step 0.
    pub fn step_backward(&self) {
        self.manual_step(-1);
    }

    fn manual_step(&self, delta: isize) {
        let pending = {
            let mut inner = self.lock();
            if inner.result.is_none() {
                return;
            }
            let movable = if delta > 0 {
                inner.state.can_step_forward()
            } else {
                inner.state.can_step_backward()
            };
            if !movable {
                return;
            }
            let mut pending = Pending::capture(&inner);
            if inner.state.is_playing() {
                inner.epoch += 1;
                inner.state = inner.state.with_status(PlaybackStatus::Paused);
                pending.state(inner.state);
            }
            let total = inner.state.total_steps();
            let next = (inner.state.current_step_index() + delta)
                .clamp(0, total as isize - 1);
            inner.state =
                PlaybackState::new_unchecked(next, total, PlaybackStatus::Paused, inner.state.speed());
            pending.state(inner.state);
            if let Some(step) = inner.current_step_cloned() {
                pending.step(step);
            }
            pending
        };
        pending.deliver();
    }

    /// Change the speed multiplier. Fails unless it lies in (0, 5.0].
    /// Takes effect on the next automatic tick.
    pub fn set_speed(&self, multiplier: f64) -> Result<()> {
        if !(multiplier > 0.0 && multiplier <= MAX_SPEED) {
            return Err(PlaybackError::InvalidSpeed(multiplier));
        }
        let pending = {
            let mut inner = self.lock();
            inner.state = PlaybackState::new_unchecked(
                inner.state.current_step_index(),
                inner.state.total_steps(),
                inner.state.status(),
                multiplier,
            );
            let mut pending = Pending::capture(&inner);
            pending.state(inner.state);
            pending
        };
        pending.deliver();
        Ok(())
    }

    /// Current playback state.
    pub fn current_state(&self) -> PlaybackState {
        self.lock().state
    }

    /// The step at the current index, `None` when nothing is loaded.
    pub fn current_step(&self) -> Option<AlgorithmStep> {
        self.lock().current_step_cloned()
    }

    /// Register a step-change listener. Listeners run synchronously in
    /// registration order.
    pub fn add_step_listener(
        &self,
        listener: impl Fn(&AlgorithmStep) + Send + Sync + 'static,
    ) -> ListenerId {
        let mut inner = self.lock();
        let id = ListenerId(inner.next_listener_id);
        inner.next_listener_id += 1;
        inner.step_listeners.push((id, Arc::new(listener)));
        id
    }

    /// Register a state-change listener.
    pub fn add_state_listener(
        &self,
        listener: impl Fn(&PlaybackState) + Send + Sync + 'static,
    ) -> ListenerId {
        let mut inner = self.lock();
        let id = ListenerId(inner.next_listener_id);
        inner.next_listener_id += 1;
        inner.state_listeners.push((id, Arc::new(listener)));
        id
    }

    /// Unregister a step listener. Unknown ids are ignored.
    pub fn remove_step_listener(&self, id: ListenerId) {
        self.lock().step_listeners.retain(|(lid, _)| *lid != id);
    }

    /// Unregister a state listener. Unknown ids are ignored.
    pub fn remove_state_listener(&self, id: ListenerId) {
        self.lock().state_listeners.retain(|(lid, _)| *lid != id);
    }

    /// Halt all automatic activity, drop every listener and return to the
    /// empty sentinel state, as if nothing was ever loaded.
    pub fn dispose(&self) {
        let mut inner = self.lock();
        inner.epoch += 1;
        inner.result = None;
        inner.state = PlaybackState::initial();
        inner.step_listeners.clear();
        inner.state_listeners.clear();
        trace!("player disposed");
    }
}

impl Inner {
    fn current_step_cloned(&self) -> Option<AlgorithmStep> {
        let result = self.result.as_ref()?;
        let index = self.state.current_step_index();
        if index < 0 {
            return None;
        }
        result.steps().get(index as usize).cloned()
    }
}

/// Automatic advancement loop. Sleeps `base_interval / speed`, then advances
/// one step while the captured epoch is still current and status is still
/// `Playing`; at the last step it settles there with status `Paused`.
async fn run_ticker(inner: Arc<Mutex<Inner>>, epoch: u64) {
    loop {
        let interval = {
            let guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
            if guard.epoch != epoch || !guard.state.is_playing() {
                return;
            }
            guard.base_interval.div_f64(guard.state.speed())
        };
        tokio::time::sleep(interval).await;

        let (pending, done) = {
            let mut guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
            // A pause or stop may have raced the sleep
            if guard.epoch != epoch || !guard.state.is_playing() {
                return;
            }
            let total = guard.state.total_steps();
            let next = guard.state.current_step_index() + 1;
            let mut pending = Pending::capture(&guard);
            if next >= total as isize {
                guard.state = PlaybackState::new_unchecked(
                    total as isize - 1,
                    total,
                    PlaybackStatus::Paused,
                    guard.state.speed(),
                );
                pending.state(guard.state);
                (pending, true)
            } else {
                guard.state = PlaybackState::new_unchecked(
                    next,
                    total,
                    PlaybackStatus::Playing,
                    guard.state.speed(),
                );
                pending.state(guard.state);
                if let Some(step) = guard.current_step_cloned() {
                    pending.step(step);
                }
                (pending, false)
            }
        };
        pending.deliver();
        if done {
            return;
        }
    }
}
