//! Browser host: paints onto a `<canvas>` and drives the backdrop from two
//! `setInterval` timers plus a window `resize` listener.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::config::BackdropConfig;
use crate::render::{DrawCommand, Surface};
use crate::schedule::{Backdrop, Lifecycle};
use crate::Viewport;

/// 2D canvas context as a [`Surface`].
#[derive(Debug)]
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `None` when the browser cannot hand out a 2D context.
    #[must_use]
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn draw(&mut self, command: &DrawCommand) {
        let ctx = &self.ctx;
        match *command {
            DrawCommand::Clear { width, height } => ctx.clear_rect(0.0, 0.0, width, height),
            DrawCommand::Line {
                from,
                to,
                width,
                color,
                alpha,
            } => {
                ctx.set_stroke_style_str(&color.to_string());
                ctx.set_global_alpha(alpha);
                ctx.set_line_width(width);
                ctx.begin_path();
                ctx.move_to(from.0, from.1);
                ctx.line_to(to.0, to.1);
                ctx.stroke();
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
                alpha,
            } => {
                ctx.set_fill_style_str(&color.to_string());
                ctx.set_global_alpha(alpha);
                ctx.begin_path();
                if ctx.arc(center.0, center.1, radius, 0.0, TAU).is_ok() {
                    ctx.fill();
                }
            }
            DrawCommand::Square {
                origin,
                size,
                color,
                alpha,
            } => {
                ctx.set_fill_style_str(&color.to_string());
                ctx.set_global_alpha(alpha);
                ctx.fill_rect(origin.0, origin.1, size, size);
            }
        }
        ctx.set_global_alpha(1.0);
    }
}

type SharedBackdrop = Rc<RefCell<Backdrop<CanvasSurface>>>;

/// Interval handles and the closures they call. The closures must outlive
/// their intervals: `clear` before dropping.
#[derive(Debug)]
struct Timers {
    window: Window,
    tick_id: i32,
    spawn_id: i32,
    _tick: Closure<dyn FnMut()>,
    _spawn: Closure<dyn FnMut()>,
    resize: Closure<dyn FnMut()>,
}

impl Timers {
    fn clear(self) {
        self.window.clear_interval_with_handle(self.tick_id);
        self.window.clear_interval_with_handle(self.spawn_id);
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
    }
}

/// JS handle for one background animation bound to one canvas.
#[wasm_bindgen]
#[derive(Debug)]
pub struct SnakeBackground {
    canvas: HtmlCanvasElement,
    backdrop: SharedBackdrop,
    timers: Option<Timers>,
}

#[wasm_bindgen]
impl SnakeBackground {
    /// `options` is an optional object with camelCase [`BackdropConfig`] fields.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, options: JsValue) -> Result<SnakeBackground, JsValue> {
        let config = if options.is_null() || options.is_undefined() {
            BackdropConfig::default()
        } else {
            serde_wasm_bindgen::from_value::<BackdropConfig>(options).map_err(js_error)?
        };
        init_logging(config.log_level().unwrap_or(log::Level::Info));
        let backdrop = Backdrop::new(config).map_err(js_error)?;
        Ok(Self {
            canvas,
            backdrop: Rc::new(RefCell::new(backdrop)),
            timers: None,
        })
    }

    /// Returns whether the animation is running afterwards. A canvas without
    /// a 2D context leaves it stopped without raising.
    pub fn start(&mut self) -> Result<bool, JsValue> {
        if self.timers.is_some() {
            return Ok(true);
        }
        let Some(window) = web_sys::window() else {
            tracing::debug!("no window, backdrop not started");
            return Ok(false);
        };

        let viewport = sync_canvas(&window, &self.canvas);
        let surface = CanvasSurface::from_canvas(&self.canvas);
        let seed = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
        let state = self
            .backdrop
            .borrow_mut()
            .start(surface, viewport, 0.0, Some(seed))
            .map_err(js_error)?;
        if state == Lifecycle::Stopped {
            return Ok(false);
        }

        match self.arm(window) {
            Ok(timers) => {
                self.timers = Some(timers);
                Ok(true)
            }
            Err(err) => {
                self.backdrop.borrow_mut().stop();
                Err(err)
            }
        }
    }

    /// Clears both timers and the resize listener. Always safe to call.
    pub fn stop(&mut self) {
        if let Some(timers) = self.timers.take() {
            timers.clear();
        }
        self.backdrop.borrow_mut().stop();
    }

    /// Resynchronize the canvas to the window size now.
    pub fn resize(&self) {
        if let Some(window) = web_sys::window() {
            let viewport = sync_canvas(&window, &self.canvas);
            self.backdrop.borrow_mut().resize(viewport);
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.backdrop.borrow().is_running()
    }

    /// Current heading discriminant, if running.
    #[must_use]
    pub fn heading(&self) -> Option<u8> {
        self.backdrop
            .borrow()
            .simulation()
            .map(|sim| sim.heading() as u8)
    }
}

impl SnakeBackground {
    fn arm(&self, window: Window) -> Result<Timers, JsValue> {
        let config = self.backdrop.borrow().config().clone();
        let tick_ms = i32::try_from(config.tick_ms).map_err(js_error)?;
        let spawn_ms = i32::try_from(config.spawn_interval_ms).map_err(js_error)?;

        let backdrop = Rc::clone(&self.backdrop);
        let tick = Closure::<dyn FnMut()>::new(move || {
            backdrop.borrow_mut().tick();
        });
        let backdrop = Rc::clone(&self.backdrop);
        let spawn = Closure::<dyn FnMut()>::new(move || {
            backdrop.borrow_mut().spawn();
        });
        let backdrop = Rc::clone(&self.backdrop);
        let canvas = self.canvas.clone();
        let resize_window = window.clone();
        let resize = Closure::<dyn FnMut()>::new(move || {
            let viewport = sync_canvas(&resize_window, &canvas);
            backdrop.borrow_mut().resize(viewport);
        });

        let tick_id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            tick_ms,
        )?;
        let spawn_id = match window.set_interval_with_callback_and_timeout_and_arguments_0(
            spawn.as_ref().unchecked_ref(),
            spawn_ms,
        ) {
            Ok(id) => id,
            Err(err) => {
                window.clear_interval_with_handle(tick_id);
                return Err(err);
            }
        };
        if let Err(err) =
            window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
        {
            window.clear_interval_with_handle(tick_id);
            window.clear_interval_with_handle(spawn_id);
            return Err(err);
        }

        Ok(Timers {
            window,
            tick_id,
            spawn_id,
            _tick: tick,
            _spawn: spawn,
            resize,
        })
    }
}

impl Drop for SnakeBackground {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Route panics and `tracing` events (through the `log` bridge) to the
/// browser console. Later calls keep the first logger.
fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(level);
}

/// Size the canvas to the window and report the new viewport.
fn sync_canvas(window: &Window, canvas: &HtmlCanvasElement) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .map_or(0, |px| px.max(0.0) as u32)
    };
    let width = dimension(window.inner_width());
    let height = dimension(window.inner_height());
    canvas.set_width(width);
    canvas.set_height(height);
    Viewport::new(width, height)
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsError::new(&err.to_string()).into()
}
