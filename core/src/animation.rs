//! Sprite-sheet layout per fighter kind and the per-fighter frame timer.

use serde::{Deserialize, Serialize};

use crate::constants::{ANIMATION_FRAME_MS, MAX_FRAMES_PER_ROW};
use crate::error::AnimationError;
use crate::types::{Action, Millis};

/// Which sprite-sheet row each action is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRows {
    pub idle: usize,
    pub moving: usize,
    pub jump: usize,
    pub block: usize,
    pub attack1: usize,
    pub attack2: usize,
}

impl Default for ActionRows {
    /// Block shares the run row; row 3 of the shipped sheets is unused.
    fn default() -> Self {
        ActionRows {
            idle: 0,
            moving: 1,
            jump: 2,
            block: 1,
            attack1: 4,
            attack2: 5,
        }
    }
}

impl ActionRows {
    pub fn row(&self, action: Action) -> usize {
        match action {
            Action::Idle => self.idle,
            Action::Move => self.moving,
            Action::Jump => self.jump,
            Action::Block => self.block,
            Action::Attack1 => self.attack1,
            Action::Attack2 => self.attack2,
        }
    }
}

/// Layout of one sprite sheet: how many cells each row holds and which of
/// them are never shown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSheet {
    pub frame_counts: Vec<u32>,
    /// Column indices to drop, per row. Shorter than `frame_counts` is fine.
    #[serde(default)]
    pub skipped: Vec<Vec<u32>>,
    #[serde(default)]
    pub rows: ActionRows,
}

impl AnimationSheet {
    pub fn new(frame_counts: Vec<u32>, skipped: Vec<Vec<u32>>) -> Self {
        AnimationSheet {
            frame_counts,
            skipped,
            rows: ActionRows::default(),
        }
    }

    pub fn validate(&self) -> Result<(), AnimationError> {
        if self.frame_counts.is_empty() {
            return Err(AnimationError::NoRows);
        }
        for action in ALL_ACTIONS {
            let row = self.rows.row(action);
            if row >= self.frame_counts.len() {
                return Err(AnimationError::MissingRow {
                    action,
                    row,
                    rows: self.frame_counts.len(),
                });
            }
        }
        for (row, &count) in self.frame_counts.iter().enumerate() {
            if count > MAX_FRAMES_PER_ROW {
                return Err(AnimationError::TooManyFrames {
                    row,
                    count,
                    max: MAX_FRAMES_PER_ROW,
                });
            }
            if self.row_len(row) == 0 {
                return Err(AnimationError::EmptyRow { row });
            }
        }
        Ok(())
    }

    fn is_skipped(&self, row: usize, col: u32) -> bool {
        self.skipped.get(row).is_some_and(|s| s.contains(&col))
    }

    /// Sheet columns actually shown for `row`, in display order.
    pub fn columns(&self, row: usize) -> impl Iterator<Item = u32> + '_ {
        let count = self.frame_counts.get(row).copied().unwrap_or(0);
        (0..count).filter(move |&col| !self.is_skipped(row, col))
    }

    /// Number of displayable frames in `row`.
    pub fn row_len(&self, row: usize) -> usize {
        let count = self.frame_counts.get(row).copied().unwrap_or(0);
        let skipped = match self.skipped.get(row) {
            Some(s) => s,
            None => return count as usize,
        };
        let hidden = skipped
            .iter()
            .enumerate()
            .filter(|&(i, &col)| col < count && !skipped[..i].contains(&col))
            .count();
        count as usize - hidden
    }

    pub fn row(&self, action: Action) -> usize {
        self.rows.row(action)
    }

    /// Number of displayable frames for an action.
    pub fn len(&self, action: Action) -> usize {
        self.row_len(self.row(action))
    }

    /// Sheet column for the `index`-th displayed frame of `action`.
    pub fn column(&self, action: Action, index: usize) -> Option<u32> {
        self.columns(self.row(action)).nth(index)
    }
}

const ALL_ACTIONS: [Action; 6] = [
    Action::Idle,
    Action::Move,
    Action::Jump,
    Action::Block,
    Action::Attack1,
    Action::Attack2,
];

/// Current action plus frame timer. The timer runs on wall-clock
/// milliseconds, unlike the frame-counted cooldowns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationState {
    pub action: Action,
    pub frame_index: usize,
    pub updated_at: Millis,
}

impl AnimationState {
    pub fn new(now: Millis) -> Self {
        AnimationState {
            action: Action::Idle,
            frame_index: 0,
            updated_at: now,
        }
    }

    /// Switch action. Restarts the animation only if the action changed.
    pub fn set_action(&mut self, action: Action, now: Millis) {
        if action != self.action {
            self.action = action;
            self.frame_index = 0;
            self.updated_at = now;
        }
    }

    /// Step one frame once more than [`ANIMATION_FRAME_MS`] has passed.
    /// Returns true when the animation ran past its last frame and wrapped.
    pub fn advance(&mut self, now: Millis, len: usize) -> bool {
        if now.saturating_sub(self.updated_at) > ANIMATION_FRAME_MS {
            self.frame_index += 1;
            self.updated_at = now;
        }
        if self.frame_index >= len {
            self.frame_index = 0;
            return true;
        }
        false
    }
}
