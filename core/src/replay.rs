use crate::clock::FixedStepClock;
use crate::controller::MatchController;
use crate::error::SetupError;
use crate::hash::{hash_seed, hash_transcript};
use crate::types::*;

/// Replay a recorded match from start to finish.
///
/// Time comes from a [`FixedStepClock`] at the config's frame rate, so the
/// same input always produces the same outcome. A frame's restart flag is
/// applied before its inputs are simulated.
pub fn run(input: &ReplayInput) -> Result<MatchOutcome, SetupError> {
    let mut clock = FixedStepClock::new(input.config.frame_rate);
    let mut controller = MatchController::new(&input.config, 0)?;
    let mut knockouts = Vec::new();

    for frame in &input.transcript {
        if frame.restart {
            controller.restart();
        }
        let events = controller.step(&frame.inputs, clock.tick());
        knockouts.extend(events.knockout);
    }

    Ok(MatchOutcome {
        frames: controller.frame(),
        knockouts,
        winner: controller.winner(),
        health: controller.health(),
        transcript_hash: hash_transcript(&input.transcript),
        seed_commit: hash_seed(input.config.seed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_HEALTH;
    use crate::init::default_config;

    fn brawl(seed: Seed, frames: usize) -> ReplayInput {
        let mut config = default_config(seed);
        config.spawn_points[1].x = 300;
        let swing = InputFrame::from_buttons(&[Button::Attack1]);
        let jab = InputFrame::from_buttons(&[Button::Attack2]);
        ReplayInput {
            config,
            transcript: vec![
                TranscriptFrame {
                    inputs: [swing, jab],
                    restart: false,
                };
                frames
            ],
        }
    }

    #[test]
    fn idle_match_has_no_winner() {
        let input = ReplayInput {
            config: default_config(1),
            transcript: vec![TranscriptFrame::default(); 600],
        };
        let outcome = run(&input).unwrap();
        assert_eq!(outcome.frames, 600);
        assert!(outcome.knockouts.is_empty());
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.health, [MAX_HEALTH, MAX_HEALTH]);
        assert_eq!(outcome.seed_commit, hash_seed(1));
    }

    #[test]
    fn replay_is_deterministic() {
        let input = brawl(42, 5_000);
        let a = run(&input).unwrap();
        let b = run(&input).unwrap();
        assert_eq!(a, b);
        assert!(!a.knockouts.is_empty());
    }

    #[test]
    fn restart_flag_starts_new_round() {
        let mut input = brawl(42, 5_000);
        let first = run(&input).unwrap().knockouts[0];
        let after = first.frame as usize + 1;
        for frame in input.transcript.iter_mut().skip(after) {
            frame.restart = true;
        }
        let outcome = run(&input).unwrap();
        assert_eq!(outcome.knockouts[0], first);
        assert!(outcome.knockouts.len() > 1);
    }

    #[test]
    fn bad_config_is_reported() {
        let mut input = brawl(1, 10);
        input.config.frame_rate = 0;
        assert_eq!(run(&input), Err(SetupError::InvalidFrameRate));
    }

    #[test]
    fn replay_input_round_trips_through_json() {
        let input = brawl(7, 3);
        let json = serde_json::to_string(&input).unwrap();
        let parsed: ReplayInput = serde_json::from_str(&json).unwrap();
        assert_eq!(run(&parsed).unwrap(), run(&input).unwrap());
    }
}
