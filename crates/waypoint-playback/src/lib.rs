//! Waypoint Playback
//!
//! Step-by-step playback over a recorded shortest-path search.
//!
//! # Architecture
//!
//! - **State**: Immutable [`PlaybackState`] snapshots (index, total, status, speed)
//! - **Player**: Load a result, then play, pause, step, or reset
//! - **Listeners**: Synchronous callbacks after every step and state change
//! - **Timer**: A Tokio task advances playback at `800 ms / speed` while playing
//!
//! # Usage
//!
//! ```ignore
//! let result = dijkstra::find_shortest_path(&graph, "a", "d")?;
//!
//! let player = Player::new();
//! player.add_step_listener(|step| println!("{step}"));
//! player.load(result)?;
//! player.play();
//! ```

mod error;
mod player;
mod state;

pub use error::{PlaybackError, Result};
pub use player::{
    ListenerId, Player, StateListener, StepListener, BASE_STEP_INTERVAL, MAX_SPEED,
};
pub use state::{PlaybackState, PlaybackStatus};
