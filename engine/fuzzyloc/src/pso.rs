//! Generic particle-swarm search over a flattened parameter vector.
//!
//! The swarm knows nothing about the model being tuned: positions are
//! plain `f64` vectors, the objective is a closure that may repair the
//! position in place before scoring it, and frozen components are simply
//! never moved. Lower scores are better.

use tracing::debug;

/// Swarm coefficients.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SwarmConfig {
    pub num_particles: usize,
    /// Inertia weight `w`.
    pub inertia: f64,
    /// Cognitive coefficient `c1` (pull toward the personal best).
    pub cognitive: f64,
    /// Social coefficient `c2` (pull toward the global best).
    pub social: f64,
    /// Per-component velocity clamp.
    pub max_velocity: f64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            num_particles: 20,
            inertia: 0.7,
            cognitive: 1.5,
            social: 1.5,
            max_velocity: 0.2,
        }
    }
}

#[derive(Debug, Clone)]
struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    best_position: Vec<f64>,
    best_score: f64,
}

/// A swarm of candidate parameter vectors sharing one global best.
#[derive(Debug)]
pub(crate) struct ParticleSwarm {
    config: SwarmConfig,
    frozen: Vec<bool>,
    particles: Vec<Particle>,
    global_best: Vec<f64>,
    global_best_score: f64,
}

impl ParticleSwarm {
    /// Seed every particle at the initial position with a small random
    /// velocity on each movable component. The global best starts at the
    /// initial position and score, so the search can never regress below
    /// its starting point.
    pub fn new(
        initial: &[f64],
        initial_score: f64,
        config: SwarmConfig,
        frozen: Vec<bool>,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let particles = (0..config.num_particles)
            .map(|_| {
                let velocity = frozen
                    .iter()
                    .map(|&frozen| {
                        if frozen {
                            0.0
                        } else {
                            (rng.f64() - 0.5) * config.max_velocity
                        }
                    })
                    .collect();
                Particle {
                    position: initial.to_vec(),
                    velocity,
                    best_position: initial.to_vec(),
                    best_score: initial_score,
                }
            })
            .collect();

        Self {
            config,
            frozen,
            particles,
            global_best: initial.to_vec(),
            global_best_score: initial_score,
        }
    }

    pub fn best_score(&self) -> f64 {
        self.global_best_score
    }

    /// Advance the whole swarm by one iteration.
    ///
    /// Per particle: move by velocity, let the objective repair and score
    /// the new position, update the personal and global bests, then update
    /// the velocity component-wise with fresh `r1`/`r2` draws and clamp it.
    pub fn iterate<F>(&mut self, rng: &mut fastrand::Rng, objective: &mut F)
    where
        F: FnMut(&mut [f64]) -> f64,
    {
        for particle in &mut self.particles {
            for (index, value) in particle.position.iter_mut().enumerate() {
                if !self.frozen[index] {
                    *value += particle.velocity[index];
                }
            }

            let score = objective(&mut particle.position);

            if score < particle.best_score {
                particle.best_score = score;
                particle.best_position.copy_from_slice(&particle.position);
                if score < self.global_best_score {
                    self.global_best_score = score;
                    self.global_best.copy_from_slice(&particle.position);
                    debug!(score, "new swarm best");
                }
            }

            for index in 0..particle.velocity.len() {
                if self.frozen[index] {
                    continue;
                }
                let r1 = rng.f64();
                let r2 = rng.f64();
                let position = particle.position[index];
                let velocity = self.config.inertia * particle.velocity[index]
                    + self.config.cognitive * r1 * (particle.best_position[index] - position)
                    + self.config.social * r2 * (self.global_best[index] - position);
                particle.velocity[index] =
                    velocity.clamp(-self.config.max_velocity, self.config.max_velocity);
            }
        }
    }
}
