//! Projectile/enemy collision.

use crate::entities::{Enemy, Projectile};
use crate::sprite::{Entity, Sprite};

/// Axis-aligned box intersection.  Touching edges count as overlap.
pub fn boxes_overlap(a: &Entity, b: &Entity) -> bool {
    !(a.right() < b.left() || a.left() > b.right() || a.bottom() < b.top() || a.top() > b.bottom())
}

/// Whether the projectile hits the enemy this tick.  Never while paused or
/// while the projectile is spent.
pub fn overlaps(projectile: &Projectile, enemy: &Enemy, paused: bool) -> bool {
    if paused || !projectile.visible() {
        return false;
    }
    boxes_overlap(projectile.entity(), enemy.entity())
}
