//! Closed-form continuous collision detection
//!
//! The tricky part of Drift Arena: predicting the exact instant two moving
//! discs (or a disc and an arena wall) first touch, without grid stepping.
//! Everything in this module is a pure function of positions, velocities,
//! radii, and masses; ownership and tolerance bookkeeping live on `Body`.

use glam::DVec2;

use crate::consts::CONTACT_TOLERANCE;

/// Surface-to-surface separation of two discs (negative when they overlap)
#[inline]
pub fn separation(pos_a: DVec2, radius_a: f64, pos_b: DVec2, radius_b: f64) -> f64 {
    (pos_b - pos_a).length() - radius_a - radius_b
}

/// True when two discs overlap by more than the tolerance band
#[inline]
pub fn discs_overlap(pos_a: DVec2, radius_a: f64, pos_b: DVec2, radius_b: f64) -> bool {
    let sigma = radius_a + radius_b;
    separation(pos_a, radius_a, pos_b, radius_b) < -CONTACT_TOLERANCE * sigma
}

/// True when two discs are within the apparent-contact band: separation in
/// (-1%, +1%) of the summed radii. The step loop uses this band, not exact
/// zero, to decide what collided after a finite-precision advancement.
#[inline]
pub fn discs_in_contact(pos_a: DVec2, radius_a: f64, pos_b: DVec2, radius_b: f64) -> bool {
    let sigma = radius_a + radius_b;
    let sep = separation(pos_a, radius_a, pos_b, radius_b);
    sep < CONTACT_TOLERANCE * sigma && sep > -CONTACT_TOLERANCE * sigma
}

/// Time until two moving discs first touch, or +∞ if they never do.
///
/// With `dr = pos_b - pos_a`, `dv = vel_b - vel_a` and `sigma = r_a + r_b`,
/// first contact solves `|dr + t*dv| == sigma`, a quadratic in `t`. The
/// earlier root is the physically meaningful one; the later root would be
/// the discs passing out the far side of each other.
///
/// The caller is responsible for rejecting already-overlapping pairs; for
/// those this formula has no meaningful answer.
pub fn pair_collision_time(
    pos_a: DVec2,
    vel_a: DVec2,
    radius_a: f64,
    pos_b: DVec2,
    vel_b: DVec2,
    radius_b: f64,
) -> f64 {
    let dr = pos_b - pos_a;
    let dv = vel_b - vel_a;
    let sigma = radius_a + radius_b;

    let a = dv.length_squared();
    let b = dv.dot(dr);
    let c = dr.length_squared() - sigma * sigma;

    // b >= 0 means the discs are not approaching each other
    if b >= 0.0 {
        return f64::INFINITY;
    }
    let d = b * b - a * c;
    if d <= 0.0 {
        return f64::INFINITY;
    }
    -(b + d.sqrt()) / a
}

/// Contact point of two moving discs, projected along the line of centers
/// at the moment of first touch; `None` if they never collide.
pub fn pair_collision_point(
    pos_a: DVec2,
    vel_a: DVec2,
    radius_a: f64,
    pos_b: DVec2,
    vel_b: DVec2,
    radius_b: f64,
) -> Option<DVec2> {
    let time = pair_collision_time(pos_a, vel_a, radius_a, pos_b, vel_b, radius_b);
    if time == f64::INFINITY {
        return None;
    }
    let sigma = radius_a + radius_b;
    let future_a = pos_a + vel_a * time;
    let future_b = pos_b + vel_b * time;
    Some(future_a + (future_b - future_a) * (radius_a / sigma))
}

/// Time until a disc touches one of the two walls bounding a single axis,
/// or +∞ if the velocity component is zero.
pub fn wall_axis_time(coord: f64, vel: f64, radius: f64, extent: f64) -> f64 {
    if vel == 0.0 {
        return f64::INFINITY;
    }
    let time = if vel > 0.0 {
        (extent - coord - radius) / vel
    } else {
        (coord - radius) / vel
    };
    time.abs()
}

/// Time until a disc first touches any arena wall
pub fn wall_collision_time(pos: DVec2, vel: DVec2, radius: f64, width: f64, height: f64) -> f64 {
    let x_time = wall_axis_time(pos.x, vel.x, radius, width);
    let y_time = wall_axis_time(pos.y, vel.y, radius, height);
    x_time.min(y_time)
}

/// Point on the struck wall where a disc will first touch it; `None` if the
/// disc never reaches a wall. The contact is projected onto the wall itself,
/// not the disc center.
pub fn wall_collision_point(
    pos: DVec2,
    vel: DVec2,
    radius: f64,
    width: f64,
    height: f64,
) -> Option<DVec2> {
    let x_time = wall_axis_time(pos.x, vel.x, radius, width);
    let y_time = wall_axis_time(pos.y, vel.y, radius, height);
    let time = x_time.min(y_time);
    if time == f64::INFINITY {
        return None;
    }
    if x_time < y_time {
        let x = if vel.x > 0.0 { width } else { 0.0 };
        Some(DVec2::new(x, pos.y + time * vel.y))
    } else {
        let y = if vel.y > 0.0 { height } else { 0.0 };
        Some(DVec2::new(pos.x + time * vel.x, y))
    }
}

/// Velocity changes of a perfectly elastic two-disc collision.
///
/// Impulse magnitude `j = 2*m_a*m_b*(dv . dr) / (sigma*(m_a + m_b))` along
/// the line of centers; the perpendicular component is untouched. Returns
/// `(delta_a, delta_b)` to add to each disc's velocity. Momentum is
/// conserved exactly along the line of centers.
pub fn elastic_impulse(
    pos_a: DVec2,
    vel_a: DVec2,
    radius_a: f64,
    mass_a: f64,
    pos_b: DVec2,
    vel_b: DVec2,
    radius_b: f64,
    mass_b: f64,
) -> (DVec2, DVec2) {
    let dr = pos_b - pos_a;
    let dv = vel_b - vel_a;
    let sigma = radius_a + radius_b;

    let j = 2.0 * mass_a * mass_b * dv.dot(dr) / (sigma * (mass_a + mass_b));
    let along_centers = dr * (j / sigma);

    (along_centers / mass_a, -along_centers / mass_b)
}
