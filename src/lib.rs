//! Drift Arena - continuous-time collision simulation for circular bodies
//!
//! Core modules:
//! - `sim`: the deterministic simulation core (bodies, closed-form collision
//!   detection, the arena and its advance-and-resolve loop)
//!
//! The engine is single-threaded and synchronous: `World::evolve` runs to
//! completion, sub-stepping through every collision inside the requested
//! time budget. All randomness (teleport destinations, fragmentation
//! headings) comes from a per-world seeded RNG, so identical inputs
//! reproduce identical trajectories.

pub mod sim;

pub use sim::{Body, BodyId, BodyKind, CollisionObserver, SimError, World};

/// Physical constants shared by the whole simulation
pub mod consts {
    /// Universal speed limit; no body may ever move faster than this
    pub const LIGHT_SPEED: f64 = 300_000.0;

    /// Smallest allowed radius per variant
    pub const SHIP_MIN_RADIUS: f64 = 10.0;
    pub const BULLET_MIN_RADIUS: f64 = 1.0;
    pub const MINOR_PLANET_MIN_RADIUS: f64 = 5.0;

    /// Densities (mass per volume) per variant
    pub const SHIP_DENSITY: f64 = 1.42e12;
    pub const BULLET_DENSITY: f64 = 7.8e12;
    pub const ASTEROID_DENSITY: f64 = 2.65e12;
    pub const PLANETOID_DENSITY: f64 = 0.917e12;

    /// Force exerted by a ship's thruster
    pub const THRUST_FORCE: f64 = 1.1e18;

    /// Bullet muzzle speed and boundary-bounce budget
    pub const BULLET_LAUNCH_SPEED: f64 = 250.0;
    pub const BULLET_WALL_HITS: u8 = 3;

    /// Planetoids at or above this radius fragment when terminated
    pub const PLANETOID_SPLIT_RADIUS: f64 = 30.0;
    /// Radius lost per unit of cumulative traveled distance
    pub const PLANETOID_EROSION_RATE: f64 = 1e-6;
    /// Fragment speed relative to the parent planetoid
    pub const SPLIT_SPEED_FACTOR: f64 = 1.5;

    /// Relative tolerance for "apparent" contact: separation within this
    /// fraction of the summed radii (or of the radius, against a wall)
    /// counts as a collision at the current instant
    pub const CONTACT_TOLERANCE: f64 = 0.01;

    /// Largest allowed arena extent
    pub const MAX_ARENA_EXTENT: f64 = f64::MAX;
}

/// Normalize an angle into [0, 2π)
#[inline]
pub fn normalize_heading(angle: f64) -> f64 {
    angle.rem_euclid(std::f64::consts::TAU)
}

/// Unit vector pointing along the given heading
#[inline]
pub fn heading_vector(heading: f64) -> glam::DVec2 {
    glam::DVec2::new(heading.cos(), heading.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_normalize_heading_wraps() {
        assert!((normalize_heading(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((normalize_heading(-PI) - PI).abs() < 1e-12);
        assert_eq!(normalize_heading(0.0), 0.0);
    }

    #[test]
    fn test_heading_vector_is_unit() {
        for heading in [0.0, 0.7, PI, 4.2] {
            assert!((heading_vector(heading).length() - 1.0).abs() < 1e-12);
        }
    }
}
