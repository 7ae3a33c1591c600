//! Presence Module
//!
//! Who is in the room, and for how long they may stay silent.
//!
//! - **`clock`** - Injectable time source (`SystemClock`, `ManualClock`)
//! - **`tracker`** - `PresenceTracker`: join, heartbeat, reap
//! - **`reaper`** - `Reaper`: the periodic task that calls `reap`
//! - **`handlers`** - `GET/POST /participants`, `POST /status`

pub mod clock;
pub mod tracker;
pub mod reaper;
pub mod handlers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use reaper::{Reaper, ReaperHandle};
pub use tracker::PresenceTracker;
