use sha2::{Digest, Sha256};

use crate::types::TranscriptFrame;

/// SHA-256 hash of the full input transcript.
pub fn hash_transcript(transcript: &[TranscriptFrame]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for frame in transcript {
        for input in &frame.inputs {
            hasher.update([input.buttons]);
        }
        hasher.update([frame.restart as u8]);
    }
    hasher.finalize().into()
}

/// SHA-256 commitment of the seed.
pub fn hash_seed(seed: u32) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_hash_deterministic() {
        let transcript = vec![TranscriptFrame::default(); 100];
        assert_eq!(hash_transcript(&transcript), hash_transcript(&transcript));
    }

    #[test]
    fn different_transcripts_different_hash() {
        let t1 = vec![TranscriptFrame::default(); 100];
        let mut t2 = t1.clone();
        t2[50].inputs[0].buttons = 1;
        assert_ne!(hash_transcript(&t1), hash_transcript(&t2));
    }

    #[test]
    fn restart_flag_is_hashed() {
        let t1 = vec![TranscriptFrame::default(); 10];
        let mut t2 = t1.clone();
        t2[9].restart = true;
        assert_ne!(hash_transcript(&t1), hash_transcript(&t2));
    }

    #[test]
    fn seed_hash_deterministic() {
        assert_eq!(hash_seed(42), hash_seed(42));
        assert_ne!(hash_seed(42), hash_seed(43));
    }
}
