//! Generates recorded-match JSON files for the replay runner.
//!
//! Usage:
//!   cargo run -p catfight-core --example gen-transcript -- [idle|brawl|turtle] > match.json

use catfight_core::*;

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "idle".to_string());

    let mut config = default_config(42);
    let frames = 30 * FRAME_RATE as usize;

    let transcript: Vec<TranscriptFrame> = match mode.as_str() {
        "idle" => {
            // Nobody touches the keyboard; no knockout
            vec![TranscriptFrame::default(); frames]
        }
        "brawl" => {
            // P1 walks in and swings, P2 stands and jabs back
            let mut transcript = Vec::with_capacity(frames);
            for frame in 0..frames {
                let p1 = if frame < 20 {
                    InputFrame::from_buttons(&[Button::Right])
                } else {
                    InputFrame::from_buttons(&[Button::Attack1])
                };
                let p2 = InputFrame::from_buttons(&[Button::Attack2]);
                transcript.push(TranscriptFrame {
                    inputs: [p1, p2],
                    restart: false,
                });
            }
            transcript
        }
        "turtle" => {
            // Start in reach; P2 holds block the whole time and P1 keeps swinging
            config.spawn_points[1].x = 300;
            vec![
                TranscriptFrame {
                    inputs: [
                        InputFrame::from_buttons(&[Button::Attack1]),
                        InputFrame::from_buttons(&[Button::Block]),
                    ],
                    restart: false,
                };
                frames
            ]
        }
        _ => {
            eprintln!("Unknown mode: {}. Use 'idle', 'brawl', or 'turtle'", mode);
            std::process::exit(1);
        }
    };

    let input = ReplayInput { config, transcript };

    // Verify by running the sim
    match replay::run(&input) {
        Ok(outcome) => {
            eprintln!("=== Sim result ({} mode) ===", mode);
            eprintln!("Frames: {}", outcome.frames);
            eprintln!("Knockouts: {}", outcome.knockouts.len());
            eprintln!(
                "Winner: {}",
                outcome.winner.map_or("none", Side::winner_label)
            );
            eprintln!("Health: P1={}, P2={}", outcome.health[0], outcome.health[1]);
        }
        Err(e) => {
            eprintln!("Invalid match config: {}", e);
            std::process::exit(1);
        }
    }

    match serde_json::to_string(&input) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to encode match: {}", e);
            std::process::exit(1);
        }
    }
}
