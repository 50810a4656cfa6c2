//! Decorative grid snake background engine.
//!
//! A single head wanders a torus grid, drifting toward the nearest target
//! and leaving a short fading trail. [`Simulation`] holds the world state,
//! [`schedule::Backdrop`] drives it from two timers, and [`render`] turns
//! each frame into draw commands for whatever surface the host provides.

pub mod cell;
pub mod config;
pub mod marquee;
pub mod render;
pub mod rng;
pub mod schedule;
pub mod steer;
pub mod timeline;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;

pub use cell::{CellPos, GridSize, Heading};
pub use config::{BackdropConfig, ConfigError};
pub use rng::{RandomSource, ScriptedRandom};
pub use schedule::{Backdrop, Lifecycle};

/// Seed used when neither the config nor the host supplies one.
pub const DEFAULT_SEED: u64 = 0x0BAC_D120_5EED;

/// Pixel size of the drawing surface.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// What a single step did to the body.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    /// Head advanced and the tail followed.
    Moved,
    /// Head landed on a target; the tail stayed put.
    Grew,
}

/// Body, targets and heading for one backdrop instance.
///
/// The body is head-first and never empty. Every coordinate lies inside
/// [`Simulation::grid`] once a step or resize has run.
#[derive(Debug)]
pub struct Simulation<R = SmallRng> {
    config: BackdropConfig,
    viewport: Viewport,
    grid: GridSize,
    body: VecDeque<CellPos>,
    targets: Vec<CellPos>,
    heading: Heading,
    rng: R,
    ticks: u64,
}

impl Simulation<SmallRng> {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: BackdropConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        Self::with_rng(config, viewport, rng::seeded(seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Fresh world with only the head at the configured start cell. Targets
    /// are not spawned here; see [`Simulation::seed_targets`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn with_rng(
        config: BackdropConfig,
        viewport: Viewport,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = GridSize::from_viewport(viewport.width, viewport.height, config.cell_size);
        let mut body = VecDeque::with_capacity(config.max_length + 1);
        body.push_back(grid.wrap(config.start));
        Ok(Self {
            targets: Vec::with_capacity(config.max_targets),
            config,
            viewport,
            grid,
            body,
            heading: Heading::default(),
            rng,
            ticks: 0,
        })
    }

    /// Replace the body (head first) and heading. An empty body is ignored.
    #[must_use]
    pub fn with_body(mut self, body: impl IntoIterator<Item = CellPos>, heading: Heading) -> Self {
        let grid = self.grid;
        let body: VecDeque<CellPos> = body
            .into_iter()
            .map(|cell| grid.wrap(cell))
            .take(self.config.max_length)
            .collect();
        if !body.is_empty() {
            self.body = body;
        }
        self.heading = heading;
        self
    }

    /// Replace the target set. Duplicates and anything past the maximum are dropped.
    #[must_use]
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = CellPos>) -> Self {
        self.targets.clear();
        for cell in targets {
            let cell = self.grid.wrap(cell);
            if self.targets.len() < self.config.max_targets && !self.targets.contains(&cell) {
                self.targets.push(cell);
            }
        }
        self
    }

    /// Spawn the configured number of starting targets.
    pub fn seed_targets(&mut self) {
        for _ in 0..self.config.initial_targets {
            self.spawn_target();
        }
    }

    /// Advance one tick.
    ///
    /// Moves the head one cell (wrapping), eats a target if it lands on one,
    /// caps the body length, then maybe re-steers toward the nearest target.
    pub fn step(&mut self) -> StepOutcome {
        let head = self.grid.wrap(self.head().step(self.heading));
        self.body.push_front(head);

        let outcome = if let Some(index) = self.targets.iter().position(|t| *t == head) {
            self.targets.remove(index);
            StepOutcome::Grew
        } else {
            self.body.pop_back();
            StepOutcome::Moved
        };

        self.body.truncate(self.config.max_length);

        if self.rng.unit() < self.config.turn_chance {
            self.heading = steer::steer(head, self.heading, self.body.len(), &self.targets);
        }

        self.ticks += 1;
        outcome
    }

    /// Try to place one more target on a free cell.
    ///
    /// Returns `false` when the set is full or every attempt hit an occupied
    /// cell; neither is an error, the next spawn cycle simply tries again.
    pub fn spawn_target(&mut self) -> bool {
        if self.targets.len() >= self.config.max_targets {
            return false;
        }
        for _ in 0..self.config.spawn_attempts {
            let cell = self.rng.cell_in(self.grid);
            if !self.is_occupied(cell) {
                self.targets.push(cell);
                return true;
            }
        }
        tracing::trace!(
            attempts = self.config.spawn_attempts,
            targets = self.targets.len(),
            "no free cell found, skipping spawn"
        );
        false
    }

    /// Adopt new surface dimensions. State is kept and re-wrapped into the new grid.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        let grid = GridSize::from_viewport(viewport.width, viewport.height, self.config.cell_size);
        self.viewport = viewport;
        self.grid = grid;
        for cell in &mut self.body {
            *cell = grid.wrap(*cell);
        }
        let mut kept = Vec::with_capacity(self.targets.len());
        for target in self.targets.drain(..) {
            let target = grid.wrap(target);
            if !kept.contains(&target) {
                kept.push(target);
            }
        }
        self.targets = kept;
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            cols = grid.cols,
            rows = grid.rows,
            "viewport resized"
        );
    }

    #[must_use]
    pub fn is_occupied(&self, cell: CellPos) -> bool {
        self.body.contains(&cell) || self.targets.contains(&cell)
    }

    #[must_use]
    pub fn head(&self) -> CellPos {
        self.body[0]
    }

    #[must_use]
    pub fn body(&self) -> &VecDeque<CellPos> {
        &self.body
    }

    #[must_use]
    pub fn targets(&self) -> &[CellPos] {
        &self.targets
    }

    #[must_use]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[wasm_bindgen]
#[must_use]
pub fn version() -> String {
    format!("backdrop {}", env!("CARGO_PKG_VERSION"))
}
