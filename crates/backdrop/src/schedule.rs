//! Timer bookkeeping and the start/stop lifecycle.
//!
//! [`Backdrop`] owns one [`Simulation`], the surface it paints to and two
//! independent [`Interval`]s: one for ticks, one for target spawns. Hosts
//! either forward their own timer callbacks to [`Backdrop::tick`] and
//! [`Backdrop::spawn`], or feed a monotonic clock into [`Backdrop::advance`].

use rand::rngs::SmallRng;

use crate::config::{BackdropConfig, ConfigError};
use crate::render::{self, Palette, Surface};
use crate::rng::{self, RandomSource};
use crate::{Simulation, StepOutcome, Viewport, DEFAULT_SEED};

/// Most firings of one timer handled by one `advance` call. Beyond this the
/// host was suspended and that timer's backlog is dropped.
pub const MAX_CATCH_UP: u32 = 32;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Lifecycle {
    #[default]
    Stopped,
    Running,
}

/// Fixed-period timer measured in host milliseconds.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Interval {
    period: f64,
    next_due: f64,
}

impl Interval {
    /// First firing is one full period after `now`.
    #[must_use]
    pub fn new(period_ms: u32, now: f64) -> Self {
        let period = f64::from(period_ms.max(1));
        Self {
            period,
            next_due: now + period,
        }
    }

    #[must_use]
    pub fn due(&self) -> f64 {
        self.next_due
    }

    #[must_use]
    pub fn is_due(&self, now: f64) -> bool {
        now >= self.next_due
    }

    /// Consume one firing if it is due.
    pub fn poll(&mut self, now: f64) -> bool {
        if self.is_due(now) {
            self.next_due += self.period;
            true
        } else {
            false
        }
    }

    /// Drop any backlog; next firing is one period after `now`.
    pub fn rearm(&mut self, now: f64) {
        self.next_due = now + self.period;
    }
}

/// Work done by one [`Backdrop::advance`] call.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Advance {
    pub ticks: u32,
    pub spawns: u32,
}

#[derive(Debug)]
struct Session<S, R> {
    sim: Simulation<R>,
    surface: S,
    tick: Interval,
    spawn: Interval,
}

/// A running (or stopped) background animation.
#[derive(Debug)]
pub struct Backdrop<S, R = SmallRng> {
    config: BackdropConfig,
    palette: Palette,
    session: Option<Session<S, R>>,
}

impl<S: Surface> Backdrop<S, SmallRng> {
    /// Start with the configured seed, or `fallback_seed` when none is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the stored config is invalid.
    pub fn start(
        &mut self,
        surface: Option<S>,
        viewport: Viewport,
        now: f64,
        fallback_seed: Option<u64>,
    ) -> Result<Lifecycle, ConfigError> {
        let seed = self
            .config
            .seed
            .or(fallback_seed)
            .unwrap_or(DEFAULT_SEED);
        self.start_with(surface, viewport, now, rng::seeded(seed))
    }
}

impl<S: Surface, R: RandomSource> Backdrop<S, R> {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: BackdropConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            palette: Palette::default(),
            session: None,
        })
    }

    #[must_use]
    pub fn with_palette(self, palette: Palette) -> Self {
        Self { palette, ..self }
    }

    /// Stopped -> Running.
    ///
    /// Builds a fresh world, seeds the initial targets and arms both
    /// timers. Without a surface nothing happens and the backdrop stays
    /// stopped. Starting an already running backdrop is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the stored config is invalid.
    pub fn start_with(
        &mut self,
        surface: Option<S>,
        viewport: Viewport,
        now: f64,
        rng: R,
    ) -> Result<Lifecycle, ConfigError> {
        if self.session.is_some() {
            return Ok(Lifecycle::Running);
        }
        let Some(surface) = surface else {
            tracing::debug!("no drawing surface available, backdrop stays stopped");
            return Ok(Lifecycle::Stopped);
        };

        let mut sim = Simulation::with_rng(self.config.clone(), viewport, rng)?;
        sim.seed_targets();
        tracing::info!(
            cols = sim.grid().cols,
            rows = sim.grid().rows,
            targets = sim.targets().len(),
            tick_ms = self.config.tick_ms,
            spawn_interval_ms = self.config.spawn_interval_ms,
            "backdrop started"
        );
        self.session = Some(Session {
            sim,
            surface,
            tick: Interval::new(self.config.tick_ms, now),
            spawn: Interval::new(self.config.spawn_interval_ms, now),
        });
        Ok(Lifecycle::Running)
    }

    /// Running -> Stopped. Safe to call repeatedly or before any start.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(ticks = session.sim.ticks(), "backdrop stopped");
        }
    }

    /// One simulation step followed by a full redraw.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        let session = self.session.as_mut()?;
        let outcome = session.sim.step();
        render::draw(&session.sim, &self.palette, &mut session.surface);
        Some(outcome)
    }

    /// One spawn-timer firing. `false` when stopped, full, or crowded.
    pub fn spawn(&mut self) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| session.sim.spawn_target())
    }

    /// Run every timer firing due at `now`, oldest first. Ticks go before
    /// spawns scheduled for the same instant. Each timer fires at most
    /// [`MAX_CATCH_UP`] times per call; a timer still due after that loses
    /// its backlog and re-arms from `now`.
    pub fn advance(&mut self, now: f64) -> Advance {
        let mut done = Advance::default();
        loop {
            let Some(session) = self.session.as_mut() else {
                return done;
            };
            let tick_due = done.ticks < MAX_CATCH_UP && session.tick.is_due(now);
            let spawn_due = done.spawns < MAX_CATCH_UP && session.spawn.is_due(now);
            if tick_due && (!spawn_due || session.tick.due() <= session.spawn.due()) {
                session.tick.poll(now);
                self.tick();
                done.ticks += 1;
            } else if spawn_due {
                session.spawn.poll(now);
                self.spawn();
                done.spawns += 1;
            } else {
                break;
            }
        }

        if let Some(session) = self.session.as_mut() {
            let ticks_dropped = session.tick.is_due(now);
            let spawns_dropped = session.spawn.is_due(now);
            if ticks_dropped {
                session.tick.rearm(now);
            }
            if spawns_dropped {
                session.spawn.rearm(now);
            }
            if ticks_dropped || spawns_dropped {
                tracing::debug!(now, ticks_dropped, spawns_dropped, "timer backlog dropped");
            }
        }
        done
    }

    /// Track a new surface size. Does not change the lifecycle state.
    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(session) = self.session.as_mut() {
            session.sim.resize(viewport);
        }
    }

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        if self.session.is_some() {
            Lifecycle::Running
        } else {
            Lifecycle::Stopped
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lifecycle() == Lifecycle::Running
    }

    #[must_use]
    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    #[must_use]
    pub fn simulation(&self) -> Option<&Simulation<R>> {
        self.session.as_ref().map(|session| &session.sim)
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.session.as_ref().map(|session| &session.surface)
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.session.as_mut().map(|session| &mut session.surface)
    }
}
