use crate::animation::AnimationSheet;
use crate::constants::*;
use crate::controls::{Controls, ControlsConfig, Key};
use crate::error::ControlsError;
use crate::types::*;

/// Sword fighter. Columns 1 and 2 of its idle row are never shown.
pub fn warrior() -> FighterArchetype {
    FighterArchetype {
        name: "warrior".to_string(),
        sprite_size: SPRITE_SIZE,
        sprite_scale: SPRITE_SCALE,
        sheet: AnimationSheet::new(vec![8, 4, 1, 7, 7, 10, 10], vec![vec![1, 2]]),
    }
}

/// Bow fighter, full sheet.
pub fn ranger() -> FighterArchetype {
    FighterArchetype {
        name: "ranger".to_string(),
        sprite_size: SPRITE_SIZE,
        sprite_scale: SPRITE_SCALE,
        sheet: AnimationSheet::new(vec![8, 8, 1, 8, 8, 10, 10], Vec::new()),
    }
}

/// A/D to walk, W to jump, 1 and 2 to attack, S to block.
pub fn left_controls_config() -> ControlsConfig {
    ControlsConfig {
        left: Some(Key::A),
        right: Some(Key::D),
        jump: Some(Key::W),
        attack1: Some(Key::Digit1),
        attack2: Some(Key::Digit2),
        block: Some(Key::S),
    }
}

/// Arrows to walk and jump, period and slash to attack, down to block.
pub fn right_controls_config() -> ControlsConfig {
    ControlsConfig {
        left: Some(Key::ArrowLeft),
        right: Some(Key::ArrowRight),
        jump: Some(Key::ArrowUp),
        attack1: Some(Key::Period),
        attack2: Some(Key::Slash),
        block: Some(Key::ArrowDown),
    }
}

pub fn left_controls() -> Result<Controls, ControlsError> {
    Controls::from_config(&left_controls_config())
}

pub fn right_controls() -> Result<Controls, ControlsError> {
    Controls::from_config(&right_controls_config())
}

/// 1000x600 street scene.
pub fn default_arena() -> ArenaBounds {
    ArenaBounds {
        width: SCREEN_WIDTH,
        height: SCREEN_HEIGHT,
        wall_left: WALL_LEFT_OFFSET,
        wall_right: WALL_RIGHT_OFFSET,
        floor: FLOOR_OFFSET,
    }
}

/// Warrior on the left against ranger on the right, Enter to restart.
pub fn default_config(seed: Seed) -> MatchConfig {
    MatchConfig {
        seed,
        arena: default_arena(),
        frame_rate: FRAME_RATE,
        spawn_points: [
            Point { x: LEFT_SPAWN_X, y: SPAWN_Y },
            Point { x: RIGHT_SPAWN_X, y: SPAWN_Y },
        ],
        controls: [left_controls_config(), right_controls_config()],
        archetypes: [warrior(), ranger()],
        restart_key: Key::Enter,
    }
}
