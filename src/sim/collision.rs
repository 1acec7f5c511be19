//! Collision tests between the player box and level geometry
//!
//! Everything is axis-aligned. Platforms are one-way surfaces, spikes use a
//! full box overlap, pits only care about the player sinking past their top,
//! and pickups/flags are proximity checks between box centers.

use super::geometry::Rect;
use crate::within;

/// Whether a falling player should snap onto a one-way platform.
///
/// The player must be moving down, overlap the platform horizontally, have
/// its bottom edge below the platform top, and have its top edge no more than
/// `tolerance` below the platform top.
pub fn lands_on_platform(player: &Rect, velocity_y: f32, platform: &Rect, tolerance: f32) -> bool {
    velocity_y > 0.0
        && player.overlaps_x(platform)
        && player.bottom() > platform.top()
        && player.top() < platform.top() + tolerance
}

/// Spike contact: any 2D overlap
#[inline]
pub fn touches_spike(player: &Rect, spike: &Rect) -> bool {
    player.intersects(spike)
}

/// Pit contact: horizontal overlap with the player's bottom edge past the pit top
#[inline]
pub fn falls_into_pit(player: &Rect, pit: &Rect) -> bool {
    player.overlaps_x(pit) && player.bottom() > pit.top()
}

/// Proximity between box centers, strictly below `radius`
#[inline]
pub fn centers_within(a: &Rect, b: &Rect, radius: f32) -> bool {
    within(a.center(), b.center(), radius)
}
