//! Camera shake: a small random translation of everything drawn this frame.
//! The compositor applies it before the geometry passes and drops it when
//! the frame ends, so shake never accumulates.

use crate::foundation::core::Vec2;
use crate::foundation::math::Rng64;

pub(crate) fn offset(strength01: f32, rng: &mut Rng64) -> Vec2 {
    let intensity = f64::from(strength01.clamp(0.0, 1.0)) * 5.0;
    Vec2::new(
        (rng.next_f64_01() - 0.5) * intensity,
        (rng.next_f64_01() - 0.5) * intensity,
    )
}
