//! Deterministic simulation core
//!
//! All engine logic lives here. This module must stay pure and deterministic:
//! - Continuous time, closed-form collision detection (no grid stepping)
//! - Seeded RNG only (one `Pcg32` per world)
//! - Stable iteration order (live bodies sorted by id)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod error;
pub mod observer;
pub mod step;
pub mod world;

pub use body::{Body, BodyId, BodyKind};
pub use collision::{
    elastic_impulse, pair_collision_point, pair_collision_time, wall_collision_point,
    wall_collision_time,
};
pub use error::SimError;
pub use observer::CollisionObserver;
pub use world::World;
