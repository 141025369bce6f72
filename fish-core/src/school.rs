use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::SchoolConfig;
#[cfg(feature = "std")]
use crate::config::ConfigError;
use crate::fish::{Fish, FishId};
#[cfg(feature = "std")]
use crate::fish::Perception;
use crate::stimulus::Stimulus;
use crate::vector::Vector2;

/// Mean position of the school, or `None` when it is empty.
pub fn centroid(fish: &[Fish]) -> Option<Vector2> {
    if fish.is_empty() {
        return None;
    }
    let sum = fish
        .iter()
        .fold(Vector2::zero(), |acc, f| acc + f.position);
    Some(sum / fish.len() as f32)
}

/// Advance every fish by one step of `dt`.
///
/// All steering forces are computed from the school as it was at the start of
/// the tick before any fish moves, so the result does not depend on the order
/// of `fish`. A zero step is a no-op; negative or non-finite steps are
/// rejected the same way.
pub fn tick(fish: &mut [Fish], stimulus: &Stimulus, config: &SchoolConfig, dt: f32) {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("ignoring tick with invalid dt {dt}");
        return;
    }
    if dt == 0.0 {
        return;
    }

    let center = centroid(fish);
    scan(fish, config, center);

    for f in fish.iter_mut() {
        f.update(dt, stimulus, config);
    }
}

#[cfg(not(feature = "parallel"))]
fn scan(fish: &mut [Fish], config: &SchoolConfig, center: Option<Vector2>) {
    for index in 0..fish.len() {
        let school: &[Fish] = fish;
        let force = school[index].steering(index, school, config, center);
        fish[index].apply_force(force);
    }
}

#[cfg(feature = "parallel")]
fn scan(fish: &mut [Fish], config: &SchoolConfig, center: Option<Vector2>) {
    use rayon::prelude::*;

    let school: &[Fish] = fish;
    let forces: Vec<Vector2> = (0..school.len())
        .into_par_iter()
        .map(|index| school[index].steering(index, school, config, center))
        .collect();

    for (f, force) in fish.iter_mut().zip(forces) {
        f.apply_force(force);
    }
}

/// A fixed-capacity school for `no_std` hosts.
pub struct FixedSchool<const N: usize> {
    pub fish: heapless::Vec<Fish, N>,
    pub stimulus: Stimulus,
    pub config: SchoolConfig,
    rng: SmallRng,
}

impl<const N: usize> FixedSchool<N> {
    pub fn new(config: SchoolConfig, seed: u64) -> Self {
        Self {
            fish: heapless::Vec::new(),
            stimulus: Stimulus::default(),
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Spawn a fish, handing it back when the school is full.
    pub fn spawn(&mut self, position: Vector2, heading: Option<f32>) -> Result<FishId, Fish> {
        let fish = Fish::spawn(position, heading, &self.config.fish, &mut self.rng);
        self.fish.push(fish)?;
        Ok(FishId(self.fish.len() - 1))
    }

    pub fn tick(&mut self, dt: f32) {
        tick(&mut self.fish, &self.stimulus, &self.config, dt);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.arena.width = width;
        self.config.arena.height = height;
    }
}

/// The whole simulation: fish, stimulus, configuration and the random source
/// used to create fish.
#[cfg(feature = "std")]
pub struct School {
    fish: Vec<Fish>,
    stimulus: Stimulus,
    config: SchoolConfig,
    rng: SmallRng,
}

#[cfg(feature = "std")]
impl School {
    pub fn new(config: SchoolConfig, seed: u64) -> Self {
        Self {
            fish: Vec::new(),
            stimulus: Stimulus::default(),
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn try_new(config: SchoolConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, seed))
    }

    /// Create a fish at `position`. Without a heading one is drawn from the
    /// school's random source.
    pub fn spawn(&mut self, position: impl Into<Vector2>, heading: Option<f32>) -> FishId {
        let fish = Fish::spawn(position.into(), heading, &self.config.fish, &mut self.rng);
        self.add_fish(fish)
    }

    pub fn add_fish(&mut self, fish: Fish) -> FishId {
        self.fish.push(fish);
        let id = FishId(self.fish.len() - 1);
        log::debug!("added fish {} (school size {})", id.0, self.fish.len());
        id
    }

    pub fn tick(&mut self, dt: f32) {
        tick(&mut self.fish, &self.stimulus, &self.config, dt);
    }

    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    pub fn get(&self, id: FishId) -> Option<&Fish> {
        self.fish.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.fish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fish.is_empty()
    }

    /// Mark a fish for per-tick perception logging. Returns `false` for an
    /// unknown id.
    pub fn set_spectate(&mut self, id: FishId, spectate: bool) -> bool {
        match self.fish.get_mut(id.0) {
            Some(fish) => {
                fish.spectate = spectate;
                true
            }
            None => false,
        }
    }

    pub fn stimulus(&self) -> &Stimulus {
        &self.stimulus
    }

    pub fn stimulus_mut(&mut self) -> &mut Stimulus {
        &mut self.stimulus
    }

    pub fn config(&self) -> &SchoolConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SchoolConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.arena.width = width;
        self.config.arena.height = height;
    }

    pub fn centroid(&self) -> Option<Vector2> {
        centroid(&self.fish)
    }

    pub fn perceive(&self, id: FishId) -> Option<Perception> {
        let fish = self.fish.get(id.0)?;
        Some(fish.perceive(id.0, &self.fish))
    }

    pub fn visible_neighbors(&self, id: FishId) -> Vec<FishId> {
        let Some(fish) = self.fish.get(id.0) else {
            return Vec::new();
        };
        self.fish
            .iter()
            .enumerate()
            .filter(|(index, other)| *index != id.0 && fish.can_see(other))
            .map(|(index, _)| FishId(index))
            .collect()
    }

    pub fn next_leader(&self, id: FishId) -> Option<FishId> {
        let fish = self.fish.get(id.0)?;
        fish.next_leader(id.0, &self.fish)
    }
}
