use serde::{Deserialize, Serialize};

use crate::animation::AnimationSheet;
use crate::constants::{FIGHTER_HEIGHT, FIGHTER_WIDTH, MAX_ARENA_EXTENT};
use crate::controls::{ControlsConfig, Key};
use crate::error::ArenaError;

// ── Primitives ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned rectangle in screen pixels, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Horizontal center, rounded toward the left edge.
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// True when the interiors intersect. Rectangles that only share an
    /// edge do not overlap, and empty rectangles overlap nothing.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

pub type Frame = u32;
pub type Seed = u32;
/// Milliseconds on the external clock.
pub type Millis = u64;

// ── Input ───────────────────────────────────────────────────

/// Button bitmask constants.
pub mod button {
    pub const LEFT: u8 = 1;
    pub const RIGHT: u8 = 2;
    pub const JUMP: u8 = 4;
    pub const ATTACK1: u8 = 8;
    pub const ATTACK2: u8 = 16;
    pub const BLOCK: u8 = 32;
}

/// The six logical buttons each fighter can press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Left,
    Right,
    Jump,
    Attack1,
    Attack2,
    Block,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::Left,
        Button::Right,
        Button::Jump,
        Button::Attack1,
        Button::Attack2,
        Button::Block,
    ];

    pub fn mask(self) -> u8 {
        match self {
            Button::Left => button::LEFT,
            Button::Right => button::RIGHT,
            Button::Jump => button::JUMP,
            Button::Attack1 => button::ATTACK1,
            Button::Attack2 => button::ATTACK2,
            Button::Block => button::BLOCK,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Button::Left => "left",
            Button::Right => "right",
            Button::Jump => "jump",
            Button::Attack1 => "attack1",
            Button::Attack2 => "attack2",
            Button::Block => "block",
        }
    }
}

impl core::fmt::Display for Button {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One fighter's pressed buttons for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    pub buttons: u8,
}

impl InputFrame {
    pub fn from_buttons(buttons: &[Button]) -> Self {
        InputFrame {
            buttons: buttons.iter().fold(0, |acc, b| acc | b.mask()),
        }
    }

    pub fn pressed(&self, b: Button) -> bool {
        self.buttons & b.mask() != 0
    }
}

pub const NULL_INPUT: InputFrame = InputFrame { buttons: 0 };

// ── Fighter ─────────────────────────────────────────────────

/// Which corner of the screen a fighter starts in. Left is player 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn player_number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn winner_label(self) -> &'static str {
        match self {
            Side::Left => "Player 1 Wins!",
            Side::Right => "Player 2 Wins!",
        }
    }
}

/// Behavioral state driving which animation row is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Idle,
    Move,
    Jump,
    Block,
    Attack1,
    Attack2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    Attack1,
    Attack2,
}

impl AttackKind {
    pub fn action(self) -> Action {
        match self {
            AttackKind::Attack1 => Action::Attack1,
            AttackKind::Attack2 => Action::Attack2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackStats {
    pub damage: i32,
    pub hit_chance: f64,
    pub cooldown: u32,
}

/// Sprite data and animation layout shared by every fighter of one kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterArchetype {
    pub name: String,
    /// Edge length of one square sprite-sheet cell, in source pixels.
    pub sprite_size: u32,
    pub sprite_scale: u32,
    pub sheet: AnimationSheet,
}

// ── Arena ───────────────────────────────────────────────────

/// Screen size plus the insets that keep fighters inside the painted
/// street. `wall_left` is how far a fighter may poke past x = 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub width: i32,
    pub height: i32,
    pub wall_left: i32,
    pub wall_right: i32,
    pub floor: i32,
}

impl ArenaBounds {
    pub fn min_x(&self) -> i32 {
        -self.wall_left
    }

    pub fn max_right(&self) -> i32 {
        self.width - self.wall_right
    }

    pub fn floor_y(&self) -> i32 {
        self.height - self.floor
    }

    /// Reject bounds a fighter cannot stand in, or large enough to overflow
    /// position arithmetic.
    pub fn validate(&self) -> Result<(), ArenaError> {
        let extent = 1..=MAX_ARENA_EXTENT;
        if !extent.contains(&self.width) || !extent.contains(&self.height) {
            return Err(ArenaError::Size {
                width: self.width,
                height: self.height,
                max: MAX_ARENA_EXTENT,
            });
        }

        let across = 0..=self.width;
        if !across.contains(&self.wall_left) || !across.contains(&self.wall_right) {
            return Err(ArenaError::Walls {
                wall_left: self.wall_left,
                wall_right: self.wall_right,
                width: self.width,
            });
        }

        if !(0..=self.height - FIGHTER_HEIGHT).contains(&self.floor) {
            return Err(ArenaError::Floor {
                floor: self.floor,
                height: self.height,
            });
        }

        let span = self.max_right() - self.min_x();
        if span < FIGHTER_WIDTH {
            return Err(ArenaError::TooNarrow { span });
        }
        Ok(())
    }

    /// A spawn point is the body's top-left corner. The body must fit between
    /// the walls with its top edge on screen; it may start below the floor.
    pub fn accepts_spawn(&self, spawn: Point) -> bool {
        spawn.x >= self.min_x()
            && spawn.x <= self.max_right() - FIGHTER_WIDTH
            && spawn.y >= 0
            && spawn.y <= self.height - FIGHTER_HEIGHT
    }
}

// ── Config ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub seed: Seed,
    pub arena: ArenaBounds,
    pub frame_rate: u32,
    /// Top-left corner of each fighter's body at match start. Index = side.
    pub spawn_points: [Point; 2],
    pub controls: [ControlsConfig; 2],
    pub archetypes: [FighterArchetype; 2],
    pub restart_key: Key,
}

// ── Replay I/O ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptFrame {
    pub inputs: [InputFrame; 2],
    /// Restart key went down this frame. Ignored unless the match is over.
    #[serde(default)]
    pub restart: bool,
}

/// A recorded match: the config it was played with plus one entry per frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayInput {
    pub config: MatchConfig,
    pub transcript: Vec<TranscriptFrame>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Knockout {
    pub frame: Frame,
    pub winner: Side,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub frames: Frame,
    /// Every knockout in order; restarts allow more than one.
    pub knockouts: Vec<Knockout>,
    /// Winner of the round still on screen when the transcript ended.
    pub winner: Option<Side>,
    pub health: [i32; 2],
    pub transcript_hash: [u8; 32],
    pub seed_commit: [u8; 32],
}
