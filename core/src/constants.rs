use crate::types::{AttackKind, AttackStats};

// All values are per-frame at 120 Hz unless noted.

// Arena
pub const SCREEN_WIDTH: i32 = 1000;
pub const SCREEN_HEIGHT: i32 = 600;
pub const WALL_LEFT_OFFSET: i32 = 80;
pub const WALL_RIGHT_OFFSET: i32 = 135;
pub const FLOOR_OFFSET: i32 = 230;

/// Largest accepted screen edge. Keeps every position sum well inside i32.
pub const MAX_ARENA_EXTENT: i32 = 1 << 16;

// Fighter body
pub const FIGHTER_WIDTH: i32 = 80;
pub const FIGHTER_HEIGHT: i32 = 180;

// Spawn (top-left of the body)
pub const LEFT_SPAWN_X: i32 = 200;
pub const RIGHT_SPAWN_X: i32 = 500;
pub const SPAWN_Y: i32 = 310;

// Physics
pub const MOVE_SPEED: i32 = 10;
pub const GRAVITY: i32 = 2;
pub const JUMP_VELOCITY: i32 = -30;

// Health / combat
pub const MAX_HEALTH: i32 = 100;
pub const ATTACK_DAMAGE: i32 = 10;
pub const ATTACK_COOLDOWN_FRAMES: u32 = 30;
pub const BLOCK_DURATION_FRAMES: u32 = 60;
pub const BLOCK_COOLDOWN_FRAMES: u32 = 240;
/// Hitbox width as a multiple of the attacker's body width.
pub const HITBOX_REACH: i32 = 2;

// Animation (milliseconds, wall clock)
pub const ANIMATION_FRAME_MS: u64 = 100;
pub const MAX_FRAMES_PER_ROW: u32 = 256;

// Frame rate
pub const FRAME_RATE: u32 = 120;

// Sprite sheets
pub const SPRITE_SIZE: u32 = 50;
pub const SPRITE_SCALE: u32 = 6;

pub fn attack_stats(kind: AttackKind) -> AttackStats {
    match kind {
        AttackKind::Attack1 => AttackStats {
            damage: ATTACK_DAMAGE,
            hit_chance: 0.9,
            cooldown: ATTACK_COOLDOWN_FRAMES,
        },
        AttackKind::Attack2 => AttackStats {
            damage: ATTACK_DAMAGE,
            hit_chance: 0.6,
            cooldown: ATTACK_COOLDOWN_FRAMES,
        },
    }
}
