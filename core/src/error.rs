//! Construction-time errors.
//!
//! The per-frame simulation never fails: out-of-range values are clamped.
//! Everything that can be wrong is wrong in the configuration, so it is
//! rejected once, when a fighter or match is built.

use crate::controls::Key;
use crate::types::{Action, Button, Point, Side};

/// Problems with a fighter's key bindings.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ControlsError {
    /// A logical button has no physical key.
    #[error("no key bound to {0}")]
    Unmapped(Button),

    /// One key drives two buttons of the same fighter.
    #[error("key {key:?} is bound to both {first} and {second}")]
    DuplicateKey {
        key: Key,
        first: Button,
        second: Button,
    },

    /// Both fighters listen to the same key.
    #[error("key {key:?} is bound for both fighters")]
    SharedKey { key: Key },
}

/// Problems with an animation sheet descriptor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    #[error("animation sheet has no rows")]
    NoRows,

    #[error("{action:?} uses row {row} but the sheet has {rows} rows")]
    MissingRow {
        action: Action,
        row: usize,
        rows: usize,
    },

    #[error("row {row} has {count} frames, more than the {max} allowed")]
    TooManyFrames { row: usize, count: u32, max: u32 },

    /// Every frame of the row is excluded, leaving nothing to display.
    #[error("row {row} has no displayable frames")]
    EmptyRow { row: usize },
}

/// Arena bounds that leave no room to play or that would overflow.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArenaError {
    #[error("arena is {width}x{height}; each side must be between 1 and {max}")]
    Size { width: i32, height: i32, max: i32 },

    #[error("wall offsets {wall_left}/{wall_right} fall outside a {width}px screen")]
    Walls {
        wall_left: i32,
        wall_right: i32,
        width: i32,
    },

    /// A standing fighter must fit between the top of the screen and the floor.
    #[error("floor offset {floor} leaves no room for a fighter in a {height}px screen")]
    Floor { floor: i32, height: i32 },

    #[error("play area is {span}px wide, narrower than a fighter")]
    TooNarrow { span: i32 },
}

/// Anything that stops a match from being set up.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("{side:?} fighter controls: {source}")]
    Controls {
        side: Side,
        #[source]
        source: ControlsError,
    },

    #[error("controls: {0}")]
    SharedControls(#[from] ControlsError),

    #[error("{side:?} fighter animation: {source}")]
    Animation {
        side: Side,
        #[source]
        source: AnimationError,
    },

    #[error("arena: {0}")]
    Arena(#[from] ArenaError),

    #[error("{side:?} fighter spawns at ({}, {}) outside the arena", .spawn.x, .spawn.y)]
    SpawnOutOfBounds { side: Side, spawn: Point },

    #[error("frame rate must be positive")]
    InvalidFrameRate,

    #[error("restart key {0:?} is also a fighter control")]
    RestartKeyBound(Key),
}
