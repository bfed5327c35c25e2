//! Bodies: the circular objects living in an arena
//!
//! `Body` carries the state and physics shared by every variant (position,
//! velocity, radius, mass, speed cap, collision-time math); `BodyKind` is a
//! closed tagged union carrying what each variant adds on top. Collision
//! *response* is variant-specific and lives in the step loop, which matches
//! on the kind pair.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::SimError;
use super::collision;
use crate::consts::*;
use crate::{heading_vector, normalize_heading};

/// World-assigned identifier; 0 until the body is first admitted
pub type BodyId = u32;

/// Identity and extents of an owning arena, cached on its members so
/// body-level math needs no back pointer to the `World`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArenaRef {
    /// Process-unique world token
    pub world: u64,
    pub width: f64,
    pub height: f64,
}

/// Ship-specific state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipState {
    /// Orientation angle in [0, 2π), 0 pointing along +x
    pub heading: f64,
    /// Whether the thruster is currently firing
    pub thruster: bool,
    /// Bullets held inside the hull; mutually exclusive with arena membership
    pub cargo: Vec<Body>,
    /// Printed-output sink, written by the external command layer
    pub output: Vec<String>,
}

/// Bullet-specific state
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BulletState {
    /// Ship that fired this bullet, stamped at fire time
    pub source: Option<BodyId>,
    /// Remaining boundary bounces before self-destruction
    pub wall_hits_left: u8,
}

/// Planetoid-specific state
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlanetoidState {
    /// Cumulative distance traveled; drives radius erosion
    pub traveled: f64,
}

/// What a body is, and the extra state that comes with it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BodyKind {
    Ship(ShipState),
    Bullet(BulletState),
    Asteroid,
    Planetoid(PlanetoidState),
}

impl BodyKind {
    /// Smallest allowed radius for this variant
    pub fn min_radius(&self) -> f64 {
        match self {
            BodyKind::Ship(_) => SHIP_MIN_RADIUS,
            BodyKind::Bullet(_) => BULLET_MIN_RADIUS,
            BodyKind::Asteroid | BodyKind::Planetoid(_) => MINOR_PLANET_MIN_RADIUS,
        }
    }

    /// Mass per volume for this variant
    pub fn density(&self) -> f64 {
        match self {
            BodyKind::Ship(_) => SHIP_DENSITY,
            BodyKind::Bullet(_) => BULLET_DENSITY,
            BodyKind::Asteroid => ASTEROID_DENSITY,
            BodyKind::Planetoid(_) => PLANETOID_DENSITY,
        }
    }

    /// True for the minor planets (asteroids and planetoids), which bounce
    /// elastically off each other
    pub fn is_minor_planet(&self) -> bool {
        matches!(self, BodyKind::Asteroid | BodyKind::Planetoid(_))
    }
}

/// A simulated circular rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub(crate) id: BodyId,
    pub(crate) pos: DVec2,
    pub(crate) vel: DVec2,
    pub(crate) radius: f64,
    pub(crate) mass: f64,
    pub(crate) max_speed: f64,
    pub(crate) alive: bool,
    pub(crate) arena: Option<ArenaRef>,
    pub(crate) kind: BodyKind,
}

/// Smallest mass a disc of the given radius and density can have
fn min_mass(radius: f64, density: f64) -> f64 {
    std::f64::consts::PI * radius.powi(3) * density * 4.0 / 3.0
}

impl Body {
    fn new(pos: DVec2, vel: DVec2, radius: f64, kind: BodyKind) -> Result<Self, SimError> {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return Err(SimError::InvalidArgument("position must be finite"));
        }
        if !(radius.is_finite() && radius >= kind.min_radius()) {
            return Err(SimError::InvalidArgument("radius below variant minimum"));
        }
        let mut body = Self {
            id: 0,
            pos,
            vel: DVec2::ZERO,
            radius,
            mass: min_mass(radius, kind.density()),
            max_speed: LIGHT_SPEED,
            alive: true,
            arena: None,
            kind,
        };
        body.set_velocity(vel.x, vel.y);
        Ok(body)
    }

    /// Create a ship. The heading must already lie in [0, 2π]; a mass below
    /// the variant minimum (or non-finite) falls back to the minimum.
    pub fn ship(
        pos: DVec2,
        vel: DVec2,
        radius: f64,
        heading: f64,
        mass: f64,
    ) -> Result<Self, SimError> {
        if !(0.0..=std::f64::consts::TAU).contains(&heading) {
            return Err(SimError::InvalidArgument("heading outside [0, 2pi]"));
        }
        let mut body = Self::new(
            pos,
            vel,
            radius,
            BodyKind::Ship(ShipState {
                heading,
                thruster: false,
                cargo: Vec::new(),
                output: Vec::new(),
            }),
        )?;
        if mass.is_finite() && mass > body.mass {
            body.mass = mass;
        }
        Ok(body)
    }

    /// Create a loose bullet with no source ship
    pub fn bullet(pos: DVec2, vel: DVec2, radius: f64) -> Result<Self, SimError> {
        Self::new(
            pos,
            vel,
            radius,
            BodyKind::Bullet(BulletState {
                source: None,
                wall_hits_left: BULLET_WALL_HITS,
            }),
        )
    }

    pub fn asteroid(pos: DVec2, vel: DVec2, radius: f64) -> Result<Self, SimError> {
        Self::new(pos, vel, radius, BodyKind::Asteroid)
    }

    /// Create a planetoid. The given radius is eroded by the pre-traveled
    /// distance before validation; a planetoid already worn below the
    /// minimum radius is rejected.
    pub fn planetoid(
        pos: DVec2,
        vel: DVec2,
        radius: f64,
        traveled: f64,
    ) -> Result<Self, SimError> {
        if !(traveled.is_finite() && traveled >= 0.0) {
            return Err(SimError::InvalidArgument(
                "traveled distance must be finite and non-negative",
            ));
        }
        let eroded = radius - PLANETOID_EROSION_RATE * traveled;
        Self::new(
            pos,
            vel,
            eroded,
            BodyKind::Planetoid(PlanetoidState { traveled }),
        )
    }

    // --- accessors ---------------------------------------------------------

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    pub fn vel(&self) -> DVec2 {
        self.vel
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kind(&self) -> &BodyKind {
        &self.kind
    }

    /// Token of the arena owning this body, if any
    pub fn arena(&self) -> Option<u64> {
        self.arena.map(|a| a.world)
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Own mass plus, for a ship, the mass of every cargo bullet
    pub fn total_mass(&self) -> f64 {
        match &self.kind {
            BodyKind::Ship(ship) => {
                self.mass + ship.cargo.iter().map(|b| b.mass).sum::<f64>()
            }
            _ => self.mass,
        }
    }

    fn shares_arena_with(&self, other: &Body) -> bool {
        match (self.arena, other.arena) {
            (Some(a), Some(b)) => a.world == b.world,
            (None, None) => true,
            _ => false,
        }
    }

    // --- position and velocity --------------------------------------------

    /// True when the given coordinate keeps the disc inside one axis of the
    /// given extent, with the engine-wide 1% slack
    fn coord_in_bounds(&self, coord: f64, extent: f64) -> bool {
        coord >= (1.0 - CONTACT_TOLERANCE) * self.radius
            && coord <= extent - (1.0 - CONTACT_TOLERANCE) * self.radius
    }

    /// True when this body's disc lies fully inside the given extents
    pub(crate) fn fits_in(&self, width: f64, height: f64) -> bool {
        self.coord_in_bounds(self.pos.x, width) && self.coord_in_bounds(self.pos.y, height)
    }

    /// Set the x coordinate. Accepted only if the disc stays inside the
    /// owning arena's bounds, or the value is finite for an ownerless body.
    pub fn set_x(&mut self, x: f64) -> Result<(), SimError> {
        match self.arena {
            Some(arena) if self.coord_in_bounds(x, arena.width) => {
                self.pos.x = x;
                Ok(())
            }
            None if x.is_finite() => {
                self.pos.x = x;
                Ok(())
            }
            _ => Err(SimError::InvalidPlacement),
        }
    }

    /// Set the y coordinate; same acceptance rule as `set_x`
    pub fn set_y(&mut self, y: f64) -> Result<(), SimError> {
        match self.arena {
            Some(arena) if self.coord_in_bounds(y, arena.height) => {
                self.pos.y = y;
                Ok(())
            }
            None if y.is_finite() => {
                self.pos.y = y;
                Ok(())
            }
            _ => Err(SimError::InvalidPlacement),
        }
    }

    /// Replace a non-finite velocity component: NaN becomes 0, infinities
    /// become the speed of light with the matching sign
    fn correct_velocity(component: f64) -> f64 {
        if component.is_nan() {
            0.0
        } else if component == f64::NEG_INFINITY {
            -LIGHT_SPEED
        } else if component == f64::INFINITY {
            LIGHT_SPEED
        } else {
            component
        }
    }

    /// Set the velocity. Non-finite components are corrected first; if the
    /// resulting speed would exceed the body's speed cap the pair is rescaled
    /// without changing direction. Never fails.
    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        let wanted = DVec2::new(Self::correct_velocity(vx), Self::correct_velocity(vy));
        let speed = wanted.length();
        if speed <= self.max_speed {
            self.vel = wanted;
        } else {
            self.vel = wanted * (self.max_speed / speed);
        }
    }

    /// Adjust the speed cap; anything outside (0, speed of light] falls
    /// back to the speed of light. A velocity now above the cap is rescaled
    /// down.
    pub fn set_max_speed(&mut self, max_speed: f64) {
        if max_speed > 0.0 && max_speed <= LIGHT_SPEED {
            self.max_speed = max_speed;
        } else {
            self.max_speed = LIGHT_SPEED;
        }
        let vel = self.vel;
        self.set_velocity(vel.x, vel.y);
    }

    // --- pairwise geometry --------------------------------------------------

    /// Distance between the two bodies' surfaces; negative when overlapping
    pub fn distance_between(&self, other: &Body) -> f64 {
        collision::separation(self.pos, self.radius, other.pos, other.radius)
    }

    /// Distance between the two bodies' centers
    pub fn distance_centers(&self, other: &Body) -> f64 {
        (other.pos - self.pos).length()
    }

    /// Whether the two bodies overlap by more than 1% of their summed radii.
    /// A body always overlaps itself. Fails unless both bodies share an
    /// arena (or both are ownerless).
    pub fn overlap(&self, other: &Body) -> Result<bool, SimError> {
        if !self.shares_arena_with(other) {
            return Err(SimError::MismatchedArena);
        }
        if std::ptr::eq(self, other) {
            return Ok(true);
        }
        Ok(collision::discs_overlap(
            self.pos,
            self.radius,
            other.pos,
            other.radius,
        ))
    }

    /// Time until this body first touches the other, +∞ if the bodies share
    /// no arena or never meet. Fails with `Overlap` for distinct bodies that
    /// already overlap; there is no meaningful first contact for those.
    pub fn time_to_collision(&self, other: &Body) -> Result<f64, SimError> {
        if self.arena.is_none() || other.arena.is_none() || !self.shares_arena_with(other) {
            return Ok(f64::INFINITY);
        }
        if !std::ptr::eq(self, other) && self.overlap(other)? {
            return Err(SimError::Overlap);
        }
        Ok(collision::pair_collision_time(
            self.pos,
            self.vel,
            self.radius,
            other.pos,
            other.vel,
            other.radius,
        ))
    }

    /// Time until this body touches a wall of its arena, +∞ if ownerless
    pub fn time_to_wall(&self) -> f64 {
        match self.arena {
            Some(arena) => collision::wall_collision_time(
                self.pos,
                self.vel,
                self.radius,
                arena.width,
                arena.height,
            ),
            None => f64::INFINITY,
        }
    }

    /// Contact point with the other body, projected along the line of
    /// centers at first touch; `None` if they never collide
    pub fn collision_position(&self, other: &Body) -> Result<Option<DVec2>, SimError> {
        if self.arena.is_none() || other.arena.is_none() || !self.shares_arena_with(other) {
            return Ok(None);
        }
        if !std::ptr::eq(self, other) && self.overlap(other)? {
            return Err(SimError::Overlap);
        }
        Ok(collision::pair_collision_point(
            self.pos,
            self.vel,
            self.radius,
            other.pos,
            other.vel,
            other.radius,
        ))
    }

    /// Point on the struck wall of this body's next boundary collision
    pub fn wall_collision_position(&self) -> Option<DVec2> {
        let arena = self.arena?;
        collision::wall_collision_point(
            self.pos,
            self.vel,
            self.radius,
            arena.width,
            arena.height,
        )
    }

    // --- apparent contact ---------------------------------------------------

    /// Whether this body is within the ±1% contact band of the other
    pub fn apparently_collides(&self, other: &Body) -> bool {
        self.shares_arena_with(other)
            && collision::discs_in_contact(self.pos, self.radius, other.pos, other.radius)
    }

    /// Whether this body sits in the contact band of a vertical wall
    pub(crate) fn touches_vertical_wall(&self) -> bool {
        let Some(arena) = self.arena else {
            return false;
        };
        let low = (1.0 - CONTACT_TOLERANCE) * self.radius;
        let high = (1.0 + CONTACT_TOLERANCE) * self.radius;
        (self.pos.x > low && self.pos.x < high)
            || (self.pos.x < arena.width - low && self.pos.x > arena.width - high)
    }

    /// Whether this body sits in the contact band of a horizontal wall
    pub(crate) fn touches_horizontal_wall(&self) -> bool {
        let Some(arena) = self.arena else {
            return false;
        };
        let low = (1.0 - CONTACT_TOLERANCE) * self.radius;
        let high = (1.0 + CONTACT_TOLERANCE) * self.radius;
        (self.pos.y > low && self.pos.y < high)
            || (self.pos.y < arena.height - low && self.pos.y > arena.height - high)
    }

    /// Whether this body is within ±1% of its radius from any arena wall
    pub fn apparently_collides_wall(&self) -> bool {
        self.touches_vertical_wall() || self.touches_horizontal_wall()
    }

    /// Current contact position projected onto the struck wall(s)
    pub(crate) fn wall_contact_point(&self) -> DVec2 {
        let Some(arena) = self.arena else {
            return self.pos;
        };
        let mut point = self.pos;
        if self.touches_vertical_wall() {
            point.x = if self.pos.x < arena.width / 2.0 {
                0.0
            } else {
                arena.width
            };
        }
        if self.touches_horizontal_wall() {
            point.y = if self.pos.y < arena.height / 2.0 {
                0.0
            } else {
                arena.height
            };
        }
        point
    }

    /// Default boundary response: negate the velocity component(s) whose
    /// wall is being struck, possibly both at a corner
    pub(crate) fn bounce_off_walls(&mut self) {
        let mut vel = self.vel;
        if self.touches_vertical_wall() {
            vel.x = -vel.x;
        }
        if self.touches_horizontal_wall() {
            vel.y = -vel.y;
        }
        self.set_velocity(vel.x, vel.y);
    }

    // --- motion -------------------------------------------------------------

    /// Translate this body along its velocity for the given duration.
    ///
    /// Ships additionally accelerate along their heading and drag their
    /// cargo with them; planetoids accrue traveled distance and erode,
    /// marking themselves dead once worn below the minimum radius (the
    /// owning world sweeps and terminates them after the move).
    pub fn advance(&mut self, dt: f64) -> Result<(), SimError> {
        if dt < 0.0 {
            return Err(SimError::NegativeDuration(dt));
        }
        self.pos += self.vel * dt;
        let step_distance = (self.vel * dt).length();
        if matches!(self.kind, BodyKind::Ship(_)) {
            self.accelerate(dt);
        }
        let pos = self.pos;
        match &mut self.kind {
            BodyKind::Ship(ship) => {
                for bullet in &mut ship.cargo {
                    bullet.pos = pos;
                }
            }
            BodyKind::Planetoid(planetoid) => {
                planetoid.traveled += step_distance;
                let eroded = self.radius - PLANETOID_EROSION_RATE * step_distance;
                if eroded >= MINOR_PLANET_MIN_RADIUS {
                    self.radius = eroded;
                } else {
                    self.alive = false;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Thruster acceleration over the given duration, along the heading
    fn accelerate(&mut self, dt: f64) {
        let BodyKind::Ship(ship) = &self.kind else {
            return;
        };
        if !ship.thruster {
            return;
        }
        let accel = (THRUST_FORCE / self.total_mass()).max(0.0);
        let heading = ship.heading;
        let vel = self.vel + heading_vector(heading) * accel * dt;
        self.set_velocity(vel.x, vel.y);
    }

    // --- ship commands ------------------------------------------------------

    /// Ship orientation in [0, 2π)
    pub fn heading(&self) -> Result<f64, SimError> {
        match &self.kind {
            BodyKind::Ship(ship) => Ok(ship.heading),
            _ => Err(SimError::NotAShip),
        }
    }

    /// Rotate the ship by an angle in [−π, π]; the new heading wraps into
    /// [0, 2π)
    pub fn turn(&mut self, angle: f64) -> Result<(), SimError> {
        if !(-std::f64::consts::PI..=std::f64::consts::PI).contains(&angle) {
            return Err(SimError::InvalidArgument("turn angle outside [-pi, pi]"));
        }
        match &mut self.kind {
            BodyKind::Ship(ship) => {
                ship.heading = normalize_heading(ship.heading + angle);
                Ok(())
            }
            _ => Err(SimError::NotAShip),
        }
    }

    pub fn thrust_on(&mut self) -> Result<(), SimError> {
        match &mut self.kind {
            BodyKind::Ship(ship) => {
                ship.thruster = true;
                Ok(())
            }
            _ => Err(SimError::NotAShip),
        }
    }

    pub fn thrust_off(&mut self) -> Result<(), SimError> {
        match &mut self.kind {
            BodyKind::Ship(ship) => {
                ship.thruster = false;
                Ok(())
            }
            _ => Err(SimError::NotAShip),
        }
    }

    pub fn thruster_active(&self) -> Result<bool, SimError> {
        match &self.kind {
            BodyKind::Ship(ship) => Ok(ship.thruster),
            _ => Err(SimError::NotAShip),
        }
    }

    /// Load a bullet into this ship's cargo. The bullet must be unowned,
    /// alive, and lie fully inside the hull.
    pub fn load_bullet(&mut self, bullet: Body) -> Result<(), SimError> {
        if !matches!(self.kind, BodyKind::Ship(_)) {
            return Err(SimError::NotAShip);
        }
        if !matches!(bullet.kind, BodyKind::Bullet(_)) {
            return Err(SimError::InvalidArgument("only bullets can be loaded"));
        }
        if !bullet.alive {
            return Err(SimError::InvalidArgument("bullet is terminated"));
        }
        if bullet.arena.is_some() {
            return Err(SimError::AlreadyOwned);
        }
        if self.distance_centers(&bullet) > self.radius - bullet.radius {
            return Err(SimError::InvalidPlacement);
        }
        if let BodyKind::Ship(ship) = &mut self.kind {
            ship.cargo.push(bullet);
        }
        Ok(())
    }

    /// Load several bullets, skipping any that are rejected; returns how
    /// many were actually loaded
    pub fn load_bullets(&mut self, bullets: impl IntoIterator<Item = Body>) -> usize {
        let mut loaded = 0;
        for bullet in bullets {
            if self.load_bullet(bullet).is_ok() {
                loaded += 1;
            }
        }
        loaded
    }

    /// Bullets currently held in cargo (empty for non-ships)
    pub fn cargo(&self) -> &[Body] {
        match &self.kind {
            BodyKind::Ship(ship) => &ship.cargo,
            _ => &[],
        }
    }

    /// Append a line to the ship's printed-output sink
    pub fn record_output(&mut self, line: impl Into<String>) -> Result<(), SimError> {
        match &mut self.kind {
            BodyKind::Ship(ship) => {
                ship.output.push(line.into());
                Ok(())
            }
            _ => Err(SimError::NotAShip),
        }
    }

    /// Lines printed so far (empty for non-ships)
    pub fn output(&self) -> &[String] {
        match &self.kind {
            BodyKind::Ship(ship) => &ship.output,
            _ => &[],
        }
    }

    // --- bullet accessors ---------------------------------------------------

    /// Ship that fired this bullet, if it is a fired bullet
    pub fn bullet_source(&self) -> Option<BodyId> {
        match &self.kind {
            BodyKind::Bullet(bullet) => bullet.source,
            _ => None,
        }
    }

    /// Remaining boundary bounces, for bullets
    pub fn wall_hits_left(&self) -> Option<u8> {
        match &self.kind {
            BodyKind::Bullet(bullet) => Some(bullet.wall_hits_left),
            _ => None,
        }
    }

    /// Cumulative distance traveled, for planetoids
    pub fn traveled_distance(&self) -> Option<f64> {
        match &self.kind {
            BodyKind::Planetoid(planetoid) => Some(planetoid.traveled),
            _ => None,
        }
    }
}
