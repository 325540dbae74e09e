pub mod animation;
pub mod clock;
pub mod collision;
pub mod constants;
pub mod controller;
pub mod controls;
pub mod error;
pub mod fighter;
pub mod hash;
pub mod init;
pub mod prng;
pub mod replay;
pub mod types;

pub use animation::{ActionRows, AnimationSheet, AnimationState};
pub use clock::{Clock, FixedStepClock};
pub use collision::check_hit;
pub use constants::*;
pub use controller::{FrameEvents, MatchController, MatchView};
pub use controls::{ensure_disjoint, Controls, ControlsConfig, Key, KeyboardState};
pub use error::{AnimationError, ArenaError, ControlsError, SetupError};
pub use fighter::{AttackReport, Fighter, FighterView, HitOutcome};
pub use hash::*;
pub use init::*;
pub use prng::*;
pub use types::*;
