//! Pairwise elastic collisions and wall reflection
//!
//! Pure routines over [`Particle`]; the simulation crate decides when to call them.

use crate::constants::{DOMAIN_MAX, DOMAIN_MIN};
use crate::particle::Particle;
use glam::DVec2;

/// Whether the velocity update is well defined for this pair.
///
/// The update only runs when every velocity component of both particles is
/// non-zero, and never for coincident centres.
fn collision_is_resolvable(p1: &Particle, p2: &Particle, separation_sq: f64) -> bool {
    let product = p1.velocity.x * p1.velocity.y * p2.velocity.x * p2.velocity.y;
    product != 0.0 && separation_sq > 0.0
}

/// Resolve an elastic collision between `p1` and `p2`, updating both velocities.
///
/// Mass-weighted projection along the line of centres:
/// u1 = v1 - 2 m2 / M * <v1 - v2, r1 - r2> / |r1 - r2|² * (r1 - r2)
///
/// Returns `false` and leaves both velocities untouched for the degenerate
/// configurations rejected by the guard above.
pub fn elastic_collision(p1: &mut Particle, p2: &mut Particle) -> bool {
    let r12 = p1.position - p2.position;
    let d = r12.length_squared();
    if !collision_is_resolvable(p1, p2, d) {
        return false;
    }

    let (m1, m2) = (p1.mass(), p2.mass());
    let total = m1 + m2;
    let v12 = p1.velocity - p2.velocity;

    // <v2 - v1, r2 - r1> == <v1 - v2, r1 - r2>, so one projection serves both
    let projection = v12.dot(r12) / d;
    let u1 = p1.velocity - 2.0 * m2 / total * projection * r12;
    let u2 = p2.velocity - 2.0 * m1 / total * projection * (-r12);

    p1.velocity = u1;
    p2.velocity = u2;
    true
}

/// Bounce a particle off the walls of the unit square.
///
/// Each axis is handled independently: the coordinate is clamped so the circle
/// lies inside the domain and the matching velocity component is negated.
/// Returns whether any wall was hit.
pub fn reflect_walls(p: &mut Particle) -> bool {
    let r = p.radius;
    let mut hit = false;

    let mut reflect_axis = |pos: &mut f64, vel: &mut f64| {
        if *pos - r < DOMAIN_MIN {
            *pos = DOMAIN_MIN + r;
            *vel = -*vel;
            hit = true;
        }
        if *pos + r > DOMAIN_MAX {
            *pos = DOMAIN_MAX - r;
            *vel = -*vel;
            hit = true;
        }
    };

    let DVec2 { x, y } = &mut p.position;
    let DVec2 { x: vx, y: vy } = &mut p.velocity;
    reflect_axis(x, vx);
    reflect_axis(y, vy);
    hit
}

/// Whether the whole circle lies inside the unit square
#[inline]
pub fn inside_domain(p: &Particle) -> bool {
    let lo = DVec2::splat(DOMAIN_MIN + p.radius);
    let hi = DVec2::splat(DOMAIN_MAX - p.radius);
    p.position.cmpge(lo).all() && p.position.cmple(hi).all()
}
