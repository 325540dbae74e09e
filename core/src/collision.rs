use crate::prng::Prng;
use crate::types::Rect;

/// Decide whether an attack connects.
///
/// A hit needs the hitbox to overlap the target and a draw within
/// `hit_chance`. No draw is taken when the boxes are apart, so a whiff
/// leaves the generator untouched.
pub fn check_hit(hitbox: &Rect, target: &Rect, hit_chance: f64, rng: &mut Prng) -> bool {
    if !hitbox.overlaps(target) {
        return false;
    }
    rng.next_f64() <= hit_chance
}
