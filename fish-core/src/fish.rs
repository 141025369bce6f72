use core::f32::consts::{PI, TAU};
use rand::Rng;

use crate::config::{Arena, BoundaryPolicy, FishConfig, SchoolConfig};
use crate::math;
use crate::random;
use crate::stimulus::Stimulus;
use crate::vector::Vector2;

/// Stable handle for a fish: its index in the school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FishId(pub usize);

/// What one fish saw during a single neighbour scan.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Perception {
    pub visible: usize,
    pub velocity_sum: Vector2,
    pub position_sum: Vector2,
    /// Closest visible neighbour and its distance. Ties keep the first one
    /// met in scan order.
    pub nearest: Option<(FishId, f32)>,
}

impl Perception {
    pub fn average_position(&self) -> Option<Vector2> {
        (self.visible > 0).then(|| self.position_sum / self.visible as f32)
    }

    pub fn average_velocity(&self) -> Option<Vector2> {
        (self.visible > 0).then(|| self.velocity_sum / self.visible as f32)
    }
}

/// A single fish.
#[derive(Debug, Clone, PartialEq)]
pub struct Fish {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Steering force accumulated during the scan phase of a tick.
    pub acceleration: Vector2,
    pub max_speed: f32,
    pub visible_radius: f32,
    pub visible_angle: f32,
    pub excited_speed: f32,
    pub scare_distance: f32,
    /// Log this fish's perception every tick.
    pub spectate: bool,
    leader_score: f32,
}

impl Fish {
    pub fn new(position: Vector2, velocity: Vector2, leader_score: f32, config: &FishConfig) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2::zero(),
            max_speed: config.max_speed,
            visible_radius: config.visible_radius,
            visible_angle: config.visible_angle,
            excited_speed: config.excited_speed,
            scare_distance: config.scare_distance,
            spectate: false,
            leader_score,
        }
    }

    /// Create a fish cruising at `max_speed`. Without an explicit heading the
    /// direction is drawn from `rng`; the leader score always is.
    pub fn spawn<R: Rng + ?Sized>(
        position: Vector2,
        heading: Option<f32>,
        config: &FishConfig,
        rng: &mut R,
    ) -> Self {
        let direction = match heading {
            Some(radians) => Vector2::from_angle(radians),
            None => random::random_heading(rng),
        };
        let leader_score = random::leader_score(rng);
        Self::new(position, direction.scale(config.max_speed), leader_score, config)
    }

    pub fn position(&self) -> (f32, f32) {
        self.position.into()
    }

    /// Direction of travel in radians, `atan2(vy, vx)`.
    pub fn heading(&self) -> f32 {
        self.velocity.angle_origin()
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    pub fn leader_score(&self) -> f32 {
        self.leader_score
    }

    pub fn apply_force(&mut self, force: Vector2) {
        self.acceleration += force;
    }

    fn backwards_velocity(&self) -> Vector2 {
        self.velocity.normalize().scale(-self.visible_radius)
    }

    fn half_blind_angle(&self) -> f32 {
        (TAU - self.visible_angle) / 2.0
    }

    /// Boundary ray of the blind cone on the counter-clockwise side.
    pub fn left_visible_vect(&self) -> Vector2 {
        self.backwards_velocity().rotate(self.half_blind_angle(), true)
    }

    /// Boundary ray of the blind cone on the clockwise side.
    pub fn right_visible_vect(&self) -> Vector2 {
        self.backwards_velocity().rotate(self.half_blind_angle(), false)
    }

    /// Whether `other` is outside this fish's blind cone, ignoring distance.
    ///
    /// A fish with zero velocity has no heading and so no blind cone.
    pub fn is_visible(&self, other: &Fish) -> bool {
        let offset = other.position - self.position;
        let outside_left = self.left_visible_vect().cross(&offset) <= 0.0;
        let outside_right = self.right_visible_vect().cross(&offset) >= 0.0;
        if self.visible_angle >= PI {
            outside_left || outside_right
        } else {
            outside_left && outside_right
        }
    }

    /// Within `visible_radius` and outside the blind cone.
    pub fn can_see(&self, other: &Fish) -> bool {
        self.position.distance(&other.position) <= self.visible_radius && self.is_visible(other)
    }

    pub fn steer_clockwise(&self, strength: f32) -> Vector2 {
        self.velocity.perpendicular_cw().normalize().scale(strength)
    }

    pub fn steer_counter_clockwise(&self, strength: f32) -> Vector2 {
        self.velocity.perpendicular_ccw().normalize().scale(strength)
    }

    /// Lateral push away from `point`, growing with the square of how far
    /// inside `visible_radius` the point is.
    ///
    /// Points on the right turn the fish counter-clockwise, everything else
    /// clockwise. A fish with zero velocity has no lateral axis and is pushed
    /// straight away from the point instead.
    pub fn steer_away_from_point(&self, point: Vector2, strength: f32) -> Vector2 {
        let to_point = point - self.position;
        let gap = self.visible_radius - to_point.magnitude();
        let magnitude = strength * gap * gap;

        if self.velocity.is_zero() {
            return to_point.normalize().flip().scale(magnitude);
        }
        if self.velocity.cross(&to_point) < 0.0 {
            self.steer_counter_clockwise(magnitude)
        } else {
            self.steer_clockwise(magnitude)
        }
    }

    /// Lateral push toward `point`; zero when the point is dead ahead or
    /// behind.
    pub fn steer_to_point(&self, point: Vector2, strength: f32) -> Vector2 {
        let side = self.velocity.cross(&(point - self.position));
        if side > 0.0 {
            self.steer_counter_clockwise(strength)
        } else if side < 0.0 {
            self.steer_clockwise(strength)
        } else {
            Vector2::zero()
        }
    }

    /// Scan `school` once, skipping `index` (this fish), and aggregate every
    /// visible neighbour.
    pub fn perceive(&self, index: usize, school: &[Fish]) -> Perception {
        let mut perception = Perception::default();

        for (other_index, other) in school.iter().enumerate() {
            if other_index == index {
                continue;
            }
            let distance = self.position.distance(&other.position);
            if distance > self.visible_radius || !self.is_visible(other) {
                continue;
            }

            perception.visible += 1;
            perception.velocity_sum += other.velocity;
            perception.position_sum += other.position;

            let closer = perception
                .nearest
                .map_or(true, |(_, best)| distance < best);
            if closer {
                perception.nearest = Some((FishId(other_index), distance));
            }
        }

        perception
    }

    /// The fish ranked immediately above this one: smallest score strictly
    /// greater than ours. `None` for the top-ranked fish.
    pub fn next_leader(&self, index: usize, school: &[Fish]) -> Option<FishId> {
        school
            .iter()
            .enumerate()
            .filter(|(other_index, other)| {
                *other_index != index && other.leader_score > self.leader_score
            })
            .fold(None, |best: Option<(usize, f32)>, (other_index, other)| match best {
                Some((_, score)) if score <= other.leader_score => best,
                _ => Some((other_index, other.leader_score)),
            })
            .map(|(other_index, _)| FishId(other_index))
    }

    /// Sum of all steering forces acting on this fish given the current,
    /// unmodified school.
    pub fn steering(
        &self,
        index: usize,
        school: &[Fish],
        config: &SchoolConfig,
        centroid: Option<Vector2>,
    ) -> Vector2 {
        let perception = self.perceive(index, school);
        if self.spectate {
            log::debug!(
                "fish {index} sees {} neighbours, nearest {:?}, average position {:?}",
                perception.visible,
                perception.nearest,
                perception.average_position()
            );
        }

        let mut force = Vector2::zero();

        if let Some((nearest, _)) = perception.nearest {
            force += self.steer_away_from_point(school[nearest.0].position, config.separation_strength);

            if config.alignment_enabled {
                if let Some(heading) = perception.average_velocity() {
                    force += self.steer_to_point(self.position + heading, config.alignment_strength);
                }
            }
            if config.cohesion_enabled {
                if let Some(center) = perception.average_position() {
                    force += self.steer_to_point(center, config.cohesion_strength);
                }
            }
        }

        if config.leader_strength > 0.0 {
            if let Some(leader) = self.next_leader(index, school) {
                force += self.steer_to_point(school[leader.0].position, config.leader_strength);
            }
        }
        if config.centroid_strength > 0.0 {
            if let Some(center) = centroid {
                force += self.steer_to_point(center, config.centroid_strength);
            }
        }

        force
    }

    /// Fold the accumulated force into velocity and cap the speed. A fish at
    /// rest stays at rest unless a force acts on it.
    pub fn integrate(&mut self, dt: f32) {
        self.velocity += self.acceleration * dt;
        self.velocity = self.velocity.clamp(0.0, self.max_speed);
        self.acceleration = Vector2::zero();
    }

    /// Bolt directly away from an activated stimulus within `scare_distance`.
    /// Returns whether the fish was frightened.
    pub fn flee(&mut self, stimulus: &Stimulus) -> bool {
        if !stimulus.frightens(self.position, self.scare_distance) {
            return false;
        }

        let mut away = (self.position - stimulus.position()).normalize();
        if away.is_zero() {
            away = self.velocity.normalize();
        }
        self.velocity = away.scale(self.excited_speed);
        true
    }

    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Apply the boundary policy after moving.
    pub fn contain(&mut self, arena: &Arena, policy: BoundaryPolicy) {
        match policy {
            BoundaryPolicy::Teleport => self.position = teleport(self.position, arena),
            BoundaryPolicy::Bounce => self.bounce(arena),
        }
    }

    fn bounce(&mut self, arena: &Arena) {
        if self.position.x < 0.0 {
            self.position.x = 0.0;
            self.velocity.x = math::abs(self.velocity.x);
        } else if self.position.x > arena.width {
            self.position.x = arena.width;
            self.velocity.x = -math::abs(self.velocity.x);
        }

        if self.position.y < 0.0 {
            self.position.y = 0.0;
            self.velocity.y = math::abs(self.velocity.y);
        } else if self.position.y > arena.height {
            self.position.y = arena.height;
            self.velocity.y = -math::abs(self.velocity.y);
        }
    }

    /// Integration half of a tick: velocity, stimulus response, motion and
    /// boundary handling. Steering forces must already be applied.
    pub fn update(&mut self, dt: f32, stimulus: &Stimulus, config: &SchoolConfig) {
        self.integrate(dt);
        if self.flee(stimulus) {
            log::debug!("fish at {:?} fleeing stimulus", self.position());
        }
        self.advance(dt);
        self.contain(&config.arena, config.boundary);
    }
}

/// Only the first violated edge, checked in the order left, top, right,
/// bottom, is handled. The crossed axis jumps to the far edge and the other
/// axis is mirrored.
fn teleport(position: Vector2, arena: &Arena) -> Vector2 {
    let Arena { width, height } = *arena;
    if position.x < 0.0 {
        Vector2::new(width, height - position.y)
    } else if position.y < 0.0 {
        Vector2::new(width - position.x, height)
    } else if position.x > width {
        Vector2::new(0.0, height - position.y)
    } else if position.y > height {
        Vector2::new(width - position.x, 0.0)
    } else {
        position
    }
}
