//! One combatant: body, health, action state and every cooldown counter.
//!
//! A fighter is advanced once per simulation frame with [`Fighter::advance`]
//! and its animation is stepped on wall-clock time with
//! [`Fighter::tick_animation`]. Cooldowns count frames; animation counts
//! milliseconds.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::animation::AnimationState;
use crate::collision::check_hit;
use crate::constants::*;
use crate::controls::Controls;
use crate::error::SetupError;
use crate::prng::Prng;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// Connected and the target took damage.
    Hit,
    /// Connected but the target was blocking.
    Blocked,
    /// Out of reach or the roll failed.
    Missed,
}

/// What happened when a fighter swung this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    pub attacker: Side,
    pub kind: AttackKind,
    pub hitbox: Rect,
    pub outcome: HitOutcome,
    pub damage: i32,
}

/// Everything a renderer needs to draw one fighter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterView {
    pub side: Side,
    pub rect: Rect,
    pub action: Action,
    pub sheet_row: usize,
    pub sheet_column: u32,
    pub frame_index: usize,
    pub flip: bool,
    /// Drawn with a blue tint while true.
    pub blocking: bool,
    pub health: i32,
    pub health_ratio: f64,
    /// Reach of an attack started this frame, for debug overlays.
    pub hitbox: Option<Rect>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fighter {
    pub side: Side,
    pub rect: Rect,
    /// Horizontal displacement applied last frame.
    pub vel_x: i32,
    pub vel_y: i32,
    pub airborne: bool,
    /// Facing left. Recomputed every frame from the opponent's position.
    pub flip: bool,
    pub health: i32,
    pub anim: AnimationState,
    pub attacking: bool,
    pub attack_kind: Option<AttackKind>,
    pub attack_cooldown: u32,
    pub blocking: bool,
    /// Frames left in the current block.
    pub block_counter: u32,
    /// Frames until a block may start again.
    pub block_cooldown: u32,
    pub hitbox: Option<Rect>,
    controls: Controls,
    archetype: FighterArchetype,
}

impl Fighter {
    pub fn new(
        side: Side,
        spawn: Point,
        archetype: FighterArchetype,
        controls: Controls,
        now: Millis,
    ) -> Result<Self, SetupError> {
        archetype
            .sheet
            .validate()
            .map_err(|source| SetupError::Animation { side, source })?;

        Ok(Fighter {
            side,
            rect: Rect::new(spawn.x, spawn.y, FIGHTER_WIDTH, FIGHTER_HEIGHT),
            vel_x: 0,
            vel_y: 0,
            airborne: false,
            flip: false,
            health: MAX_HEALTH,
            anim: AnimationState::new(now),
            attacking: false,
            attack_kind: None,
            attack_cooldown: 0,
            blocking: false,
            block_counter: 0,
            block_cooldown: 0,
            hitbox: None,
            controls,
            archetype,
        })
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn archetype(&self) -> &FighterArchetype {
        &self.archetype
    }

    pub fn action(&self) -> Action {
        self.anim.action
    }

    pub fn is_knocked_out(&self) -> bool {
        self.health <= 0
    }

    /// Run one simulation frame.
    ///
    /// Sub-step order:
    ///  1. Tick attack and block cooldowns
    ///  2. Block phase (expire or start)
    ///  3. Pick the displayed action from last frame's state
    ///  4. Movement, jump and attack, unless attacking or blocking
    ///  5. Gravity
    ///  6. Clamp to walls and floor
    ///  7. Face the opponent
    ///  8. Move
    pub fn advance(
        &mut self,
        arena: &ArenaBounds,
        input: InputFrame,
        now: Millis,
        opponent: &mut Fighter,
        rng: &mut Prng,
    ) -> Option<AttackReport> {
        let mut dx = 0;
        let mut dy = 0;
        let mut report = None;
        self.hitbox = None;

        // 1. Cooldowns
        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
        self.block_cooldown = self.block_cooldown.saturating_sub(1);

        // 2. Block phase
        self.update_block(input);

        // 3. Action, using vel_x from the previous frame
        self.select_action(now);

        // 4. Movement
        if !self.attacking && !self.blocking {
            if input.pressed(Button::Left) {
                dx = -MOVE_SPEED;
            }
            if input.pressed(Button::Right) {
                dx = MOVE_SPEED;
            }
            if input.pressed(Button::Jump) && !self.airborne {
                self.vel_y = JUMP_VELOCITY;
                self.airborne = true;
            }
            if self.attack_cooldown == 0 {
                let kind = if input.pressed(Button::Attack1) {
                    Some(AttackKind::Attack1)
                } else if input.pressed(Button::Attack2) {
                    Some(AttackKind::Attack2)
                } else {
                    None
                };
                if let Some(kind) = kind {
                    report = Some(self.attack(kind, opponent, rng));
                }
            }
        }

        // 5. Gravity, applied even on the ground
        self.vel_y += GRAVITY;
        dy += self.vel_y;

        // 6. Walls and floor
        if self.rect.left() + dx < arena.min_x() {
            dx = arena.min_x() - self.rect.left();
        }
        if self.rect.right() + dx > arena.max_right() {
            dx = arena.max_right() - self.rect.right();
        }
        if self.rect.bottom() + dy > arena.floor_y() {
            self.vel_y = 0;
            self.airborne = false;
            dy = arena.floor_y() - self.rect.bottom();
        }

        // 7. Facing
        self.flip = opponent.rect.center_x() <= self.rect.center_x();

        // 8. Move
        self.rect.x += dx;
        self.rect.y += dy;
        self.vel_x = dx;

        report
    }

    fn update_block(&mut self, input: InputFrame) {
        if self.blocking {
            self.block_counter = self.block_counter.saturating_sub(1);
            if self.block_counter == 0 {
                self.blocking = false;
                self.block_cooldown = BLOCK_COOLDOWN_FRAMES;
                trace!(side = ?self.side, "block expired");
            }
        } else if input.pressed(Button::Block) && self.block_cooldown == 0 {
            self.blocking = true;
            self.block_counter = BLOCK_DURATION_FRAMES;
            trace!(side = ?self.side, "block raised");
        }
    }

    fn select_action(&mut self, now: Millis) {
        let action = if self.attacking {
            match self.attack_kind {
                Some(kind) => kind.action(),
                None => return,
            }
        } else if self.airborne {
            Action::Jump
        } else if self.blocking {
            Action::Block
        } else if self.vel_x != 0 {
            Action::Move
        } else {
            Action::Idle
        };
        self.anim.set_action(action, now);
    }

    /// Reach of an attack thrown now: from the body's center, twice the body
    /// width toward the facing side, same height as the body.
    pub fn attack_hitbox(&self) -> Rect {
        let reach = HITBOX_REACH * self.rect.width;
        let offset = if self.flip { -reach } else { 0 };
        Rect::new(
            self.rect.center_x() + offset,
            self.rect.y,
            reach,
            self.rect.height,
        )
    }

    /// Swing at `target`. The cooldown is armed whether or not it lands.
    pub fn attack(
        &mut self,
        kind: AttackKind,
        target: &mut Fighter,
        rng: &mut Prng,
    ) -> AttackReport {
        let stats = attack_stats(kind);
        self.attacking = true;
        self.attack_kind = Some(kind);

        let hitbox = self.attack_hitbox();
        self.hitbox = Some(hitbox);

        let (outcome, damage) = if check_hit(&hitbox, &target.rect, stats.hit_chance, rng) {
            if target.blocking {
                target.take_damage(stats.damage);
                (HitOutcome::Blocked, 0)
            } else {
                (HitOutcome::Hit, target.take_damage(stats.damage))
            }
        } else {
            (HitOutcome::Missed, 0)
        };

        self.attack_cooldown = stats.cooldown;

        debug!(
            attacker = ?self.side,
            ?kind,
            ?outcome,
            damage,
            target_health = target.health,
            "attack resolved"
        );

        AttackReport {
            attacker: self.side,
            kind,
            hitbox,
            outcome,
            damage,
        }
    }

    /// Apply incoming damage. A blocking fighter takes nothing; otherwise
    /// health drops by `amount` and stops at zero. Returns what was taken.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if self.blocking {
            return 0;
        }
        let before = self.health;
        self.health = (self.health - amount.max(0)).max(0);
        before - self.health
    }

    /// Step the displayed frame. Finishing an attack animation ends the
    /// attack and drops back to idle.
    pub fn tick_animation(&mut self, now: Millis) {
        let len = self.archetype.sheet.len(self.anim.action);
        if self.anim.advance(now, len) && self.attacking {
            self.attacking = false;
            self.attack_kind = None;
            self.anim.set_action(Action::Idle, now);
        }
    }

    pub fn reset_health(&mut self) {
        self.health = MAX_HEALTH;
    }

    pub fn view(&self) -> FighterView {
        let sheet = &self.archetype.sheet;
        let action = self.anim.action;
        FighterView {
            side: self.side,
            rect: self.rect,
            action,
            sheet_row: sheet.row(action),
            sheet_column: sheet.column(action, self.anim.frame_index).unwrap_or(0),
            frame_index: self.anim.frame_index,
            flip: self.flip,
            blocking: self.blocking,
            health: self.health,
            health_ratio: self.health as f64 / MAX_HEALTH as f64,
            hitbox: self.hitbox,
        }
    }
}
