//! Collision observer hook
//!
//! An opaque external hook notified once per resolved collision, for
//! visualization only. Observers have no physical effect on the simulation.

use glam::DVec2;

use super::BodyId;

/// Receives a notification for every collision the step loop resolves.
///
/// `point` is the contact position at the instant of resolution. For a
/// body/body collision both participants are reported; for a boundary
/// collision only the struck body is.
pub trait CollisionObserver {
    /// Two bodies collided and their collision was resolved
    fn body_collision(&mut self, point: DVec2, first: BodyId, second: BodyId);

    /// A body struck one (or, at a corner, two) of the arena walls
    fn wall_collision(&mut self, point: DVec2, body: BodyId);
}
