//! The advance-and-resolve loop
//!
//! `evolve` sub-steps through the requested duration: advance every body to
//! the earliest upcoming collision (or to the end of the budget), then
//! resolve everything in apparent contact at that instant, walls first.
//! Each body joins at most one body/body pair per instant; resolution order
//! across unrelated pairs is unspecified. Three or more mutually touching
//! bodies at the same instant are resolved pairwise, which is not physically
//! sound; callers needing that case must not rely on the outcome.

use log::{debug, trace};

use super::SimError;
use super::body::{BodyId, BodyKind};
use super::collision;
use super::observer::CollisionObserver;
use super::world::World;
use crate::consts::BULLET_WALL_HITS;

/// How a body/body contact is resolved, decided from the two kinds
enum Resolution {
    /// Elastic bounce along the line of centers
    Bounce,
    /// Both participants die (bullet strikes)
    DestroyBoth,
    /// Only the given body dies (ship on asteroid)
    Terminate(BodyId),
    /// The given ship is teleported (ship on planetoid)
    Teleport(BodyId),
    /// A fired bullet returns into its source ship's cargo
    Holster { ship: BodyId, bullet: BodyId },
    /// Nothing happens and no one is notified (fresh bullet still flush
    /// against the hull that fired it)
    Skip,
}

impl World {
    /// Advance the simulation by `dt` time units, resolving every collision
    /// on the way. The duration must be finite and non-negative. Each
    /// resolved collision is reported to the observer, if one is given.
    pub fn evolve(
        &mut self,
        dt: f64,
        mut observer: Option<&mut dyn CollisionObserver>,
    ) -> Result<(), SimError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::InvalidDuration(dt));
        }
        let mut remaining = dt;
        while remaining > 0.0 {
            let (time, _) = self.next_collision();
            let step = time.min(remaining);
            trace!(
                "world {}: advancing {step}, next collision in {time}",
                self.token
            );
            for body in &mut self.bodies {
                body.advance(step)?;
            }
            self.sweep_eroded();
            if time <= remaining {
                self.resolve_wall_contacts(&mut observer);
                self.resolve_pair_contacts(&mut observer);
            }
            remaining -= step;
        }
        Ok(())
    }

    /// Terminate bodies that died during advancement (planetoids worn below
    /// the minimum radius); a large one still fragments.
    fn sweep_eroded(&mut self) {
        let dead: Vec<BodyId> = self
            .bodies
            .iter()
            .filter(|b| !b.alive)
            .map(|b| b.id)
            .collect();
        for id in dead {
            debug!("world {}: body {id} eroded away", self.token);
            let _ = self.terminate_body(id);
        }
    }

    fn resolve_wall_contacts(&mut self, observer: &mut Option<&mut dyn CollisionObserver>) {
        let hits: Vec<BodyId> = self
            .bodies
            .iter()
            .filter(|b| b.apparently_collides_wall())
            .map(|b| b.id)
            .collect();
        for id in hits {
            let Some(at) = self.index_of(id) else { continue };
            let point = self.bodies[at].wall_contact_point();
            let spent = match &mut self.bodies[at].kind {
                BodyKind::Bullet(bullet) => {
                    bullet.wall_hits_left = bullet.wall_hits_left.saturating_sub(1);
                    bullet.wall_hits_left == 0
                }
                _ => false,
            };
            if let Some(obs) = observer.as_deref_mut() {
                obs.wall_collision(point, id);
            }
            if spent {
                trace!("world {}: bullet {id} spent its bounce budget", self.token);
                let _ = self.terminate_body(id);
            } else {
                self.bodies[at].bounce_off_walls();
            }
        }
    }

    fn resolve_pair_contacts(&mut self, observer: &mut Option<&mut dyn CollisionObserver>) {
        let mut engaged: Vec<BodyId> = Vec::new();
        let mut pairs: Vec<(BodyId, BodyId)> = Vec::new();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if engaged.contains(&a.id) || engaged.contains(&b.id) {
                    continue;
                }
                if a.apparently_collides(b) {
                    engaged.push(a.id);
                    engaged.push(b.id);
                    pairs.push((a.id, b.id));
                }
            }
        }
        for (first, second) in pairs {
            self.resolve_pair(first, second, observer);
        }
    }

    fn resolve_pair(
        &mut self,
        first: BodyId,
        second: BodyId,
        observer: &mut Option<&mut dyn CollisionObserver>,
    ) {
        let (Some(i), Some(j)) = (self.index_of(first), self.index_of(second)) else {
            return;
        };
        let point = {
            let (a, b) = (&self.bodies[i], &self.bodies[j]);
            a.pos + (b.pos - a.pos) * (a.radius / (a.radius + b.radius))
        };

        let resolution = {
            let (a, b) = (&self.bodies[i], &self.bodies[j]);
            match (&a.kind, &b.kind) {
                (BodyKind::Bullet(bullet), BodyKind::Ship(_))
                    if bullet.source == Some(b.id) =>
                {
                    if bullet.wall_hits_left == BULLET_WALL_HITS {
                        Resolution::Skip
                    } else {
                        Resolution::Holster { ship: b.id, bullet: a.id }
                    }
                }
                (BodyKind::Ship(_), BodyKind::Bullet(bullet))
                    if bullet.source == Some(a.id) =>
                {
                    if bullet.wall_hits_left == BULLET_WALL_HITS {
                        Resolution::Skip
                    } else {
                        Resolution::Holster { ship: a.id, bullet: b.id }
                    }
                }
                (BodyKind::Bullet(_), _) | (_, BodyKind::Bullet(_)) => Resolution::DestroyBoth,
                (BodyKind::Ship(_), BodyKind::Ship(_)) => Resolution::Bounce,
                (BodyKind::Ship(_), BodyKind::Asteroid) => Resolution::Terminate(a.id),
                (BodyKind::Asteroid, BodyKind::Ship(_)) => Resolution::Terminate(b.id),
                (BodyKind::Ship(_), BodyKind::Planetoid(_)) => Resolution::Teleport(a.id),
                (BodyKind::Planetoid(_), BodyKind::Ship(_)) => Resolution::Teleport(b.id),
                // Asteroid/planetoid combinations bounce like billiard balls
                _ => Resolution::Bounce,
            }
        };

        if matches!(resolution, Resolution::Skip) {
            return;
        }
        if let Some(obs) = observer.as_deref_mut() {
            obs.body_collision(point, first, second);
        }
        trace!("world {}: resolving contact {first}/{second}", self.token);

        match resolution {
            Resolution::Skip => {}
            Resolution::Bounce => {
                let (a, b) = self.pair_mut(i, j);
                let (delta_a, delta_b) = collision::elastic_impulse(
                    a.pos,
                    a.vel,
                    a.radius,
                    a.total_mass(),
                    b.pos,
                    b.vel,
                    b.radius,
                    b.total_mass(),
                );
                let (va, vb) = (a.vel + delta_a, b.vel + delta_b);
                a.set_velocity(va.x, va.y);
                b.set_velocity(vb.x, vb.y);
            }
            Resolution::DestroyBoth => {
                // Remove the bullet before its victim so a fragmenting
                // planetoid spawns into the space the bullet occupied
                let order = if matches!(self.bodies[i].kind, BodyKind::Bullet(_)) {
                    [first, second]
                } else {
                    [second, first]
                };
                for id in order {
                    let _ = self.terminate_body(id);
                }
            }
            Resolution::Terminate(ship) => {
                let _ = self.terminate_body(ship);
            }
            Resolution::Teleport(ship) => {
                let _ = self.teleport(ship);
            }
            Resolution::Holster { ship, bullet } => {
                let Ok(mut returned) = self.remove_body(bullet) else {
                    return;
                };
                if let BodyKind::Bullet(state) = &mut returned.kind {
                    state.wall_hits_left = BULLET_WALL_HITS;
                }
                if let Some(carrier) = self.body_mut(ship) {
                    returned.pos = carrier.pos;
                    if let BodyKind::Ship(state) = &mut carrier.kind {
                        state.cargo.push(returned);
                    }
                }
            }
        }
    }
}
