//! Browser host binding
//!
//! Exposes a `BouncyBalls` handle to JavaScript. The page owns the canvas and
//! draws the balls; this side owns the simulation and, once started, drives
//! it from `requestAnimationFrame`, calling the page's render callback after
//! every tick.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Float32Array, Function};
use wasm_bindgen::prelude::*;

use super::schedule::FrameSchedule;
use super::time::DateNowSource;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::sim::{Column, Simulation};

type SharedSim = Rc<RefCell<Simulation<DateNowSource>>>;

/// Pending animation frame and the page's render callback
#[derive(Default)]
struct Schedule {
    frames: FrameSchedule,
    on_frame: Option<Function>,
}

type SharedSchedule = Rc<RefCell<Schedule>>;

fn to_js(err: SimError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialized when the page creates a second handle
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct BouncyBalls {
    sim: SharedSim,
    schedule: SharedSchedule,
}

#[wasm_bindgen]
impl BouncyBalls {
    /// Create the balls for a `width` x `height` canvas and start ticking
    /// every animation frame. `config_json` may override any `SimConfig`
    /// field. `on_frame` is called after each tick.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        config_json: Option<String>,
        on_frame: Option<Function>,
    ) -> Result<BouncyBalls, JsValue> {
        init_logging();

        let config = match config_json {
            Some(json) => SimConfig::from_json(&json).map_err(to_js)?,
            None => SimConfig::default(),
        };
        let sim = Simulation::initialize(width, height, &config, DateNowSource).map_err(to_js)?;

        let balls = BouncyBalls {
            sim: Rc::new(RefCell::new(sim)),
            schedule: Rc::new(RefCell::new(Schedule::default())),
        };
        start(&balls.sim, &balls.schedule, on_frame);
        Ok(balls)
    }

    pub fn resize(&self, width: u32, height: u32) -> Result<(), JsValue> {
        self.sim.borrow_mut().resize(width, height).map_err(to_js)
    }

    /// Run one clock-driven tick by hand. Returns the delta, or nothing when
    /// stopped.
    pub fn step(&self) -> Option<f32> {
        self.sim.borrow_mut().tick()
    }

    /// Start ticking every animation frame, calling `on_frame` after each tick
    #[wasm_bindgen(js_name = startSchedule)]
    pub fn start_schedule(&self, on_frame: Option<Function>) {
        start(&self.sim, &self.schedule, on_frame);
    }

    #[wasm_bindgen(js_name = stopSchedule)]
    pub fn stop_schedule(&self) {
        stop(&self.sim, &self.schedule);
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.sim.borrow().is_running()
    }

    /// Stop when the window loses focus and restart when it regains it
    #[wasm_bindgen(js_name = pauseOnBlur)]
    pub fn pause_on_blur(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        {
            let sim = self.sim.clone();
            let schedule = self.schedule.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                stop(&sim, &schedule);
                log::info!("Stopped (window blur)");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let sim = self.sim.clone();
            let schedule = self.schedule.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                start(&sim, &schedule, None);
                log::info!("Restarted (window focus)");
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    pub fn count(&self) -> usize {
        self.sim.borrow().count()
    }

    /// Copies of all five columns, in x/y/vx/vy/radius order
    pub fn columns(&self) -> Array {
        let sim = self.sim.borrow();
        let view = sim.state();
        Column::ALL
            .iter()
            .map(|&column| Float32Array::from(view.column(column)))
            .collect()
    }

    /// Copy of one column by name ("x", "y", "vx", "vy", "radius")
    pub fn column(&self, name: &str) -> Option<Float32Array> {
        let column = Column::ALL.into_iter().find(|c| c.as_str() == name)?;
        let sim = self.sim.borrow();
        Some(Float32Array::from(sim.state().column(column)))
    }

    /// Address of a column in wasm memory, for a zero-copy `Float32Array`
    /// view. Only valid until the next tick or until the handle is freed.
    #[wasm_bindgen(js_name = columnPtr)]
    pub fn column_ptr(&self, index: usize) -> Option<u32> {
        let column = *Column::ALL.get(index)?;
        let sim = self.sim.borrow();
        Some(sim.state().column(column).as_ptr() as u32)
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.sim.borrow().snapshot_json().map_err(to_js)
    }
}

fn start(sim: &SharedSim, schedule: &SharedSchedule, on_frame: Option<Function>) {
    {
        let mut sched = schedule.borrow_mut();
        if on_frame.is_some() {
            sched.on_frame = on_frame;
        }
        if sched.frames.pending().is_some() {
            // Already scheduled
            return;
        }
    }
    sim.borrow_mut().start_schedule();
    request_frame(sim.clone(), schedule.clone());
}

fn stop(sim: &SharedSim, schedule: &SharedSchedule) {
    sim.borrow_mut().stop_schedule();
    if let Some(id) = schedule.borrow_mut().frames.cancel() {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

fn request_frame(sim: SharedSim, schedule: SharedSchedule) {
    let Some(window) = web_sys::window() else {
        log::error!("no window to schedule frames on");
        return;
    };
    let pending = schedule.clone();
    let closure = Closure::once(move |_time: f64| {
        run_frame(sim, schedule);
    });
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => pending.borrow_mut().frames.armed(id),
        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
    }
    closure.forget();
}

fn run_frame(sim: SharedSim, schedule: SharedSchedule) {
    schedule.borrow_mut().frames.begin_frame();

    if sim.borrow_mut().tick().is_none() {
        return;
    }

    let on_frame = schedule.borrow().on_frame.clone();
    if let Some(callback) = on_frame {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::warn!("render callback failed: {:?}", e);
        }
    }

    // The callback may have stopped or restarted the schedule
    let running = sim.borrow().is_running();
    if schedule.borrow().frames.needs_request(running) {
        request_frame(sim, schedule);
    }
}
