//! Match controller: owns both fighters and the shared RNG, runs them in a
//! fixed order each frame and decides the winner.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::controls::{ensure_disjoint, Controls, Key, KeyboardState};
use crate::error::SetupError;
use crate::fighter::{AttackReport, Fighter, FighterView};
use crate::prng::Prng;
use crate::types::*;

/// Everything that happened during one call to [`MatchController::step`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameEvents {
    /// Attacks in resolution order: left fighter first.
    pub attacks: Vec<AttackReport>,
    pub knockout: Option<Knockout>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub frame: Frame,
    pub fighters: [FighterView; 2],
    pub game_over: bool,
    pub winner: Option<Side>,
    /// End-of-match banner text.
    pub winner_label: Option<String>,
}

#[derive(Clone, Debug)]
pub struct MatchController {
    fighters: [Fighter; 2],
    arena: ArenaBounds,
    rng: Prng,
    frame: Frame,
    game_over: bool,
    winner: Option<Side>,
    restart_key: Key,
}

impl MatchController {
    /// Validate `config` and place both fighters at their spawn points.
    pub fn new(config: &MatchConfig, now: Millis) -> Result<Self, SetupError> {
        if config.frame_rate == 0 {
            return Err(SetupError::InvalidFrameRate);
        }
        config.arena.validate()?;
        for side in [Side::Left, Side::Right] {
            let spawn = config.spawn_points[side.index()];
            if !config.arena.accepts_spawn(spawn) {
                return Err(SetupError::SpawnOutOfBounds { side, spawn });
            }
        }

        let controls = |side: Side| {
            Controls::from_config(&config.controls[side.index()])
                .map_err(|source| SetupError::Controls { side, source })
        };
        let left_controls = controls(Side::Left)?;
        let right_controls = controls(Side::Right)?;
        ensure_disjoint(&left_controls, &right_controls)?;

        if left_controls.binds(config.restart_key) || right_controls.binds(config.restart_key) {
            return Err(SetupError::RestartKeyBound(config.restart_key));
        }

        let left = Fighter::new(
            Side::Left,
            config.spawn_points[0],
            config.archetypes[0].clone(),
            left_controls,
            now,
        )?;
        let right = Fighter::new(
            Side::Right,
            config.spawn_points[1],
            config.archetypes[1].clone(),
            right_controls,
            now,
        )?;

        Ok(MatchController {
            fighters: [left, right],
            arena: config.arena,
            rng: Prng::new(config.seed),
            frame: 0,
            game_over: false,
            winner: None,
            restart_key: config.restart_key,
        })
    }

    /// Run one frame.
    ///
    /// Order: left advances and animates, then right advances and animates,
    /// then knockouts are checked. Right therefore sees left's state from
    /// this frame while left saw right's from the previous one. Nothing moves
    /// once the match is over.
    pub fn step(&mut self, inputs: &[InputFrame; 2], now: Millis) -> FrameEvents {
        let mut events = FrameEvents::default();

        if !self.game_over {
            let [left, right] = &mut self.fighters;

            events
                .attacks
                .extend(left.advance(&self.arena, inputs[0], now, right, &mut self.rng));
            left.tick_animation(now);

            events
                .attacks
                .extend(right.advance(&self.arena, inputs[1], now, left, &mut self.rng));
            right.tick_animation(now);

            events.knockout = self.check_knockout();
        }

        self.frame += 1;
        events
    }

    /// Sample both fighters' bindings from live key state, then step.
    pub fn step_keys<K: KeyboardState + ?Sized>(&mut self, keys: &K, now: Millis) -> FrameEvents {
        let inputs = [
            self.fighters[0].controls().sample(keys),
            self.fighters[1].controls().sample(keys),
        ];
        self.step(&inputs, now)
    }

    /// Left is checked first, so a double knockout goes to the right fighter.
    fn check_knockout(&mut self) -> Option<Knockout> {
        let winner = if self.fighters[0].is_knocked_out() {
            Side::Right
        } else if self.fighters[1].is_knocked_out() {
            Side::Left
        } else {
            return None;
        };

        self.game_over = true;
        self.winner = Some(winner);
        info!(frame = self.frame, ?winner, "knockout");
        Some(Knockout {
            frame: self.frame,
            winner,
        })
    }

    /// Start a new round after a knockout. Only health is refilled; position,
    /// action and cooldowns carry over. Returns false if the match is still
    /// running.
    pub fn restart(&mut self) -> bool {
        if !self.game_over {
            return false;
        }
        for fighter in &mut self.fighters {
            fighter.reset_health();
        }
        self.game_over = false;
        self.winner = None;
        info!(frame = self.frame, "round restarted");
        true
    }

    /// Discrete key press from the front-end. Returns true if it restarted.
    pub fn key_down(&mut self, key: Key) -> bool {
        key == self.restart_key && self.restart()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn winner_label(&self) -> Option<&'static str> {
        self.winner.map(Side::winner_label)
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    pub fn restart_key(&self) -> Key {
        self.restart_key
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        &self.fighters[side.index()]
    }

    pub fn fighter_mut(&mut self, side: Side) -> &mut Fighter {
        &mut self.fighters[side.index()]
    }

    pub fn health(&self) -> [i32; 2] {
        [self.fighters[0].health, self.fighters[1].health]
    }

    pub fn view(&self) -> MatchView {
        MatchView {
            frame: self.frame,
            fighters: [self.fighters[0].view(), self.fighters[1].view()],
            game_over: self.game_over,
            winner: self.winner,
            winner_label: self.winner_label().map(str::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedStepClock};
    use crate::constants::*;
    use crate::controls::ControlsConfig;
    use crate::error::{ArenaError, ControlsError};
    use crate::fighter::HitOutcome;
    use crate::init::default_config;
    use std::collections::HashSet;

    /// Fighters close enough that attack1 from the left connects.
    fn close_config(seed: Seed) -> MatchConfig {
        let mut config = default_config(seed);
        config.spawn_points[1].x = 300;
        config
    }

    fn press(buttons: &[Button]) -> InputFrame {
        InputFrame::from_buttons(buttons)
    }

    #[test]
    fn default_config_builds() {
        let m = MatchController::new(&default_config(1), 0).unwrap();
        assert_eq!(m.frame(), 0);
        assert!(!m.game_over());
        assert_eq!(m.winner(), None);
        assert_eq!(m.health(), [MAX_HEALTH, MAX_HEALTH]);
        assert_eq!(m.fighter(Side::Right).rect.x, RIGHT_SPAWN_X);
    }

    #[test]
    fn unmapped_button_names_side() {
        let mut config = default_config(1);
        config.controls[1].attack2 = None;
        let err = MatchController::new(&config, 0).unwrap_err();
        assert_eq!(
            err,
            SetupError::Controls {
                side: Side::Right,
                source: ControlsError::Unmapped(Button::Attack2),
            }
        );
    }

    #[test]
    fn shared_key_rejected() {
        let mut config = default_config(1);
        config.controls[1] = ControlsConfig {
            jump: Some(Key::W),
            ..config.controls[1]
        };
        let err = MatchController::new(&config, 0).unwrap_err();
        assert_eq!(
            err,
            SetupError::SharedControls(ControlsError::SharedKey { key: Key::W })
        );
    }

    #[test]
    fn restart_key_must_be_free() {
        let mut config = default_config(1);
        config.restart_key = Key::ArrowDown;
        assert_eq!(
            MatchController::new(&config, 0).unwrap_err(),
            SetupError::RestartKeyBound(Key::ArrowDown)
        );
    }

    #[test]
    fn zero_frame_rate_rejected() {
        let mut config = default_config(1);
        config.frame_rate = 0;
        assert_eq!(
            MatchController::new(&config, 0).unwrap_err(),
            SetupError::InvalidFrameRate
        );
    }

    #[test]
    fn unplayable_arena_rejected() {
        let mut config = default_config(1);
        config.arena.height = i32::MIN + 100;
        assert!(matches!(
            MatchController::new(&config, 0),
            Err(SetupError::Arena(ArenaError::Size { .. }))
        ));

        let mut config = default_config(1);
        config.arena.wall_right = config.arena.width + 1;
        assert!(matches!(
            MatchController::new(&config, 0),
            Err(SetupError::Arena(ArenaError::Walls { .. }))
        ));

        let mut config = default_config(1);
        config.arena.floor = config.arena.height;
        assert!(matches!(
            MatchController::new(&config, 0),
            Err(SetupError::Arena(ArenaError::Floor { .. }))
        ));

        let mut config = default_config(1);
        config.arena.width = 100;
        config.arena.wall_left = 0;
        config.arena.wall_right = 50;
        assert!(matches!(
            MatchController::new(&config, 0),
            Err(SetupError::Arena(ArenaError::TooNarrow { span: 50 }))
        ));
    }

    #[test]
    fn spawn_outside_arena_rejected() {
        let mut config = default_config(1);
        config.spawn_points[1].x = i32::MAX - 10;
        assert_eq!(
            MatchController::new(&config, 0).unwrap_err(),
            SetupError::SpawnOutOfBounds {
                side: Side::Right,
                spawn: Point {
                    x: i32::MAX - 10,
                    y: SPAWN_Y,
                },
            }
        );

        let mut config = default_config(1);
        config.spawn_points[0].y = -1;
        assert!(matches!(
            MatchController::new(&config, 0),
            Err(SetupError::SpawnOutOfBounds {
                side: Side::Left,
                ..
            })
        ));
    }

    #[test]
    fn edge_spawns_step_without_overflow() {
        let mut config = default_config(1);
        let arena = config.arena;
        config.spawn_points = [
            Point {
                x: arena.min_x(),
                y: 0,
            },
            Point {
                x: arena.max_right() - FIGHTER_WIDTH,
                y: arena.height - FIGHTER_HEIGHT,
            },
        ];
        let mut m = MatchController::new(&config, 0).unwrap();
        let mut clock = FixedStepClock::new(FRAME_RATE);
        for _ in 0..300 {
            m.step(
                &[press(&[Button::Left, Button::Jump]), press(&[Button::Right])],
                clock.tick(),
            );
        }
        assert_eq!(m.fighter(Side::Left).rect.x, arena.min_x());
        assert_eq!(m.fighter(Side::Right).rect.right(), arena.max_right());
    }

    #[test]
    fn ten_health_falls_to_two_unblocked_hits() {
        let mut m = MatchController::new(&default_config(5), 0).unwrap();
        let right = m.fighter_mut(Side::Right);
        right.health = 10;
        assert_eq!(right.take_damage(ATTACK_DAMAGE), 10);
        assert_eq!(right.take_damage(ATTACK_DAMAGE), 0);
        assert_eq!(right.health, 0);

        let events = m.step(&[NULL_INPUT; 2], 8);
        assert_eq!(
            events.knockout,
            Some(Knockout {
                frame: 0,
                winner: Side::Left,
            })
        );
        assert!(m.game_over());
        assert_eq!(m.winner_label(), Some("Player 1 Wins!"));
    }

    #[test]
    fn two_hits_knock_out_a_weakened_fighter() {
        // Seed 42 draws ~0.601 then ~0.448: both inside attack1's 0.9
        let mut m = MatchController::new(&close_config(42), 0).unwrap();
        m.fighter_mut(Side::Right).health = 20;
        let mut clock = FixedStepClock::new(FRAME_RATE);
        let inputs = [press(&[Button::Attack1]), NULL_INPUT];

        let mut hits = 0;
        let mut knockout = None;
        for _ in 0..1000 {
            let events = m.step(&inputs, clock.tick());
            hits += events
                .attacks
                .iter()
                .filter(|a| a.outcome == HitOutcome::Hit)
                .count();
            if let Some(ko) = events.knockout {
                knockout = Some(ko);
                break;
            }
        }

        assert_eq!(hits, 2);
        assert_eq!(m.fighter(Side::Right).health, 0);
        assert!(m.game_over());
        assert_eq!(m.winner(), Some(Side::Left));
        assert_eq!(m.winner_label(), Some("Player 1 Wins!"));
        assert_eq!(knockout.map(|k| k.winner), Some(Side::Left));
    }

    #[test]
    fn nothing_moves_after_knockout() {
        let mut m = MatchController::new(&default_config(3), 0).unwrap();
        m.fighter_mut(Side::Left).health = 0;
        let events = m.step(&[NULL_INPUT; 2], 8);
        assert_eq!(events.knockout.map(|k| k.winner), Some(Side::Right));

        let before = m.fighter(Side::Left).clone();
        let events = m.step(&[press(&[Button::Right, Button::Jump]); 2], 16);
        assert!(events.attacks.is_empty());
        assert_eq!(events.knockout, None);
        assert_eq!(m.fighter(Side::Left), &before);
        assert_eq!(m.frame(), 2);
    }

    #[test]
    fn double_knockout_goes_to_right() {
        let mut m = MatchController::new(&default_config(3), 0).unwrap();
        m.fighter_mut(Side::Left).health = 0;
        m.fighter_mut(Side::Right).health = 0;
        m.step(&[NULL_INPUT; 2], 8);
        assert_eq!(m.winner(), Some(Side::Right));
        assert_eq!(m.winner_label(), Some("Player 2 Wins!"));
    }

    #[test]
    fn restart_refills_health_only() {
        let mut m = MatchController::new(&default_config(3), 0).unwrap();
        let mut clock = FixedStepClock::new(FRAME_RATE);
        for _ in 0..5 {
            m.step(&[press(&[Button::Right]), press(&[Button::Block])], clock.tick());
        }
        m.fighter_mut(Side::Right).health = 0;
        m.fighter_mut(Side::Left).attack_cooldown = 12;
        m.step(&[NULL_INPUT; 2], clock.tick());
        assert!(m.game_over());

        let left = m.fighter(Side::Left).clone();
        let right = m.fighter(Side::Right).clone();

        assert!(!m.key_down(Key::Space));
        assert!(m.game_over());
        assert!(m.key_down(Key::Enter));

        assert!(!m.game_over());
        assert_eq!(m.winner(), None);
        assert_eq!(m.health(), [MAX_HEALTH, MAX_HEALTH]);
        assert_eq!(m.fighter(Side::Left).rect, left.rect);
        assert_eq!(m.fighter(Side::Left).attack_cooldown, left.attack_cooldown);
        assert_eq!(m.fighter(Side::Right).rect, right.rect);
        assert_eq!(m.fighter(Side::Right).blocking, right.blocking);
        assert_eq!(m.fighter(Side::Right).block_counter, right.block_counter);
        assert_eq!(m.fighter(Side::Right).action(), right.action());
    }

    #[test]
    fn restart_ignored_mid_match() {
        let mut m = MatchController::new(&default_config(3), 0).unwrap();
        m.fighter_mut(Side::Left).health = 40;
        assert!(!m.restart());
        assert!(!m.key_down(Key::Enter));
        assert_eq!(m.fighter(Side::Left).health, 40);
    }

    #[test]
    fn right_sees_left_block_from_same_frame() {
        let mut m = MatchController::new(&close_config(42), 0).unwrap();
        // Settle on the floor and compute facing
        m.step(&[NULL_INPUT; 2], 8);

        let events = m.step(&[press(&[Button::Block]), press(&[Button::Attack1])], 16);
        assert_eq!(events.attacks.len(), 1);
        assert_eq!(events.attacks[0].attacker, Side::Right);
        assert_eq!(events.attacks[0].outcome, HitOutcome::Blocked);
        assert_eq!(m.fighter(Side::Left).health, MAX_HEALTH);
    }

    #[test]
    fn left_attacks_before_right_can_block() {
        let mut m = MatchController::new(&close_config(42), 0).unwrap();
        m.step(&[NULL_INPUT; 2], 8);

        let events = m.step(&[press(&[Button::Attack1]), press(&[Button::Block])], 16);
        assert_eq!(events.attacks.len(), 1);
        assert_eq!(events.attacks[0].outcome, HitOutcome::Hit);
        assert!(m.fighter(Side::Right).blocking);
        assert_eq!(m.fighter(Side::Right).health, MAX_HEALTH - ATTACK_DAMAGE);
    }

    #[test]
    fn step_keys_samples_both_layouts() {
        let mut m = MatchController::new(&default_config(3), 0).unwrap();
        m.step(&[NULL_INPUT; 2], 8);
        let held: HashSet<Key> = [Key::A, Key::ArrowLeft].into_iter().collect();
        m.step_keys(&held, 16);
        assert_eq!(m.fighter(Side::Left).rect.x, LEFT_SPAWN_X - MOVE_SPEED);
        assert_eq!(m.fighter(Side::Right).rect.x, RIGHT_SPAWN_X - MOVE_SPEED);
    }

    #[test]
    fn health_stays_in_range_under_random_play() {
        let mut m = MatchController::new(&close_config(9), 0).unwrap();
        let mut clock = FixedStepClock::new(FRAME_RATE);
        let mut noise = Prng::new(77);
        let mut knockouts = 0;
        for _ in 0..20_000 {
            let mut buttons = [0u8; 2];
            for b in &mut buttons {
                *b = (noise.next_f64() * 64.0) as u8;
            }
            let inputs = [
                InputFrame { buttons: buttons[0] },
                InputFrame { buttons: buttons[1] },
            ];
            if m.step(&inputs, clock.tick()).knockout.is_some() {
                knockouts += 1;
            }
            for h in m.health() {
                assert!((0..=MAX_HEALTH).contains(&h), "health {}", h);
            }
            if m.game_over() {
                m.restart();
            }
        }
        assert!(clock.now_ms() > 0);
        assert!(knockouts > 0);
    }

    #[test]
    fn view_carries_banner() {
        let mut m = MatchController::new(&default_config(3), 0).unwrap();
        assert_eq!(m.view().winner_label, None);
        m.fighter_mut(Side::Right).health = 0;
        m.step(&[NULL_INPUT; 2], 8);
        let view = m.view();
        assert!(view.game_over);
        assert_eq!(view.winner_label.as_deref(), Some("Player 1 Wins!"));
        assert_eq!(view.fighters[1].health, 0);
        assert_eq!(view.fighters[0].side, Side::Left);
    }
}
