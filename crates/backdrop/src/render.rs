//! Frame building: simulation state to draw commands.
//!
//! A frame is always a full redraw, in paint order: clear, grid lines,
//! targets, then body segments from head to tail. Hosts implement
//! [`Surface`] to put the commands on screen.

use std::fmt;

use crate::rng::RandomSource;
use crate::Simulation;

pub const GRID_ALPHA: f64 = 0.1;
pub const GRID_LINE_WIDTH: f64 = 0.5;
pub const TARGET_ALPHA: f64 = 0.2;

/// Head opacity; each segment behind it is `BODY_ALPHA_STEP` fainter.
pub const BODY_ALPHA_HEAD: f64 = 0.15;
pub const BODY_ALPHA_STEP: f64 = 0.02;
pub const BODY_ALPHA_MIN: f64 = 0.05;

/// Gap left between a body square and its cell edge, in pixels.
const BODY_INSET: f64 = 1.0;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// From a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn hex(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }
}

/// CSS hex notation, e.g. `#3b82f6`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Palette {
    pub body: Rgb,
    pub target: Rgb,
    pub grid: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            body: Rgb::hex(0x003b_82f6),
            target: Rgb::hex(0x0010_b981),
            grid: Rgb::hex(0x00e5_e7eb),
        }
    }
}

/// Pixel-space drawing primitive.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgb,
        alpha: f64,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        color: Rgb,
        alpha: f64,
    },
    Square {
        origin: (f64, f64),
        size: f64,
        color: Rgb,
        alpha: f64,
    },
}

/// Anything that can paint a [`DrawCommand`].
pub trait Surface {
    fn draw(&mut self, command: &DrawCommand);
}

/// Records commands instead of painting them.
impl Surface for Vec<DrawCommand> {
    fn draw(&mut self, command: &DrawCommand) {
        self.push(*command);
    }
}

/// Opacity of the body segment `index` places behind the head.
#[must_use]
pub fn body_alpha(index: usize) -> f64 {
    (BODY_ALPHA_HEAD - BODY_ALPHA_STEP * index as f64).max(BODY_ALPHA_MIN)
}

/// Build every command for one frame.
#[must_use]
pub fn frame<R: RandomSource>(sim: &Simulation<R>, palette: &Palette) -> Vec<DrawCommand> {
    let viewport = sim.viewport();
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let cell = sim.config().cell_size;
    let size = f64::from(cell);

    let columns = viewport.width.div_ceil(cell) as usize;
    let rows = viewport.height.div_ceil(cell) as usize;
    let mut commands =
        Vec::with_capacity(1 + columns + rows + sim.targets().len() + sim.body().len());

    commands.push(DrawCommand::Clear { width, height });

    for x in (0..viewport.width).step_by(cell as usize) {
        let x = f64::from(x);
        commands.push(DrawCommand::Line {
            from: (x, 0.0),
            to: (x, height),
            width: GRID_LINE_WIDTH,
            color: palette.grid,
            alpha: GRID_ALPHA,
        });
    }
    for y in (0..viewport.height).step_by(cell as usize) {
        let y = f64::from(y);
        commands.push(DrawCommand::Line {
            from: (0.0, y),
            to: (width, y),
            width: GRID_LINE_WIDTH,
            color: palette.grid,
            alpha: GRID_ALPHA,
        });
    }

    for target in sim.targets() {
        commands.push(DrawCommand::Circle {
            center: (
                f64::from(target.x) * size + size / 2.0,
                f64::from(target.y) * size + size / 2.0,
            ),
            radius: size / 3.0,
            color: palette.target,
            alpha: TARGET_ALPHA,
        });
    }

    for (index, segment) in sim.body().iter().enumerate() {
        commands.push(DrawCommand::Square {
            origin: (
                f64::from(segment.x) * size + BODY_INSET,
                f64::from(segment.y) * size + BODY_INSET,
            ),
            size: size - 2.0 * BODY_INSET,
            color: palette.body,
            alpha: body_alpha(index),
        });
    }

    commands
}

/// Paint one full frame onto `surface`.
pub fn draw<R, S>(sim: &Simulation<R>, palette: &Palette, surface: &mut S)
where
    R: RandomSource,
    S: Surface + ?Sized,
{
    for command in frame(sim, palette) {
        surface.draw(&command);
    }
}
