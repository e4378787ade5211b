#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, Window};

use crate::util::Color;
#[cfg(target_arch = "wasm32")]
use crate::{
    playback::{AnimationController, FrameScheduler},
    rendering::{Canvas2d, Renderer, layout::HexLayout},
    sim::{JsEngine, SimulationEngine},
    ui::{FpsCounter, PointerMap, SurfaceMetrics},
};

pub mod playback;
pub mod rendering;
pub mod sim;
pub mod ui;
pub mod util;

/// Presentation constants shared by construction between the renderer, the
/// animation controller, and the input mapper, so the components cannot
/// drift apart at runtime.
#[derive(Clone, Debug)]
pub struct ViewConfig {
    /// Hexagon circumradius in backing-store pixels.
    pub cell_size: f64,
    /// Frames between successive simulation steps.
    pub stride: u32,
    pub dead_color: Color,
    pub alive_color: Color,
    /// Desired pixel footprint the grid hint is derived from.
    pub footprint: (f64, f64),
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            cell_size: 5.0,
            stride: 10,
            dead_color: Color::rgb(0x11, 0x11, 0x11),
            alive_color: Color::rgb(0xFF, 0xAA, 0x00),
            footprint: (800.0, 600.0),
        }
    }
}

#[cfg(target_arch = "wasm32")]
const CANVAS_ID: &str = "game-of-life-canvas";
#[cfg(target_arch = "wasm32")]
const PLAY_PAUSE_ID: &str = "play-pause";
#[cfg(target_arch = "wasm32")]
const FPS_ID: &str = "fps";

#[cfg(target_arch = "wasm32")]
const GLYPH_PLAY: &str = "\u{25B6}";
#[cfg(target_arch = "wasm32")]
const GLYPH_PAUSE: &str = "\u{23F8}";

#[cfg(target_arch = "wasm32")]
type SharedFrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Frame scheduling through `requestAnimationFrame`. The callback slot is
/// shared with the harness, which installs the loop closure once at startup.
#[cfg(target_arch = "wasm32")]
struct RafScheduler {
    window: Window,
    callback: SharedFrameCallback,
}

#[cfg(target_arch = "wasm32")]
impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn schedule(&mut self) -> i32 {
        let callback = self.callback.borrow();
        let callback = callback
            .as_ref()
            .expect("frame callback installed before scheduling");
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .expect("requestAnimationFrame failed")
    }

    fn cancel(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame failed: {err:?}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
struct App {
    engine: JsEngine,
    renderer: Renderer,
    surface: Canvas2d,
    controller: AnimationController<RafScheduler>,
    fps: FpsCounter,
    readout: Element,
}

#[cfg(target_arch = "wasm32")]
impl App {
    /// Loop body for one scheduled frame: FPS bookkeeping every frame, then
    /// draw-current-state-and-step on stride boundaries.
    fn on_frame(&mut self, now: f64) {
        self.fps.record(now);
        if let Some(summary) = self.fps.summary() {
            self.readout.set_text_content(Some(&summary.render()));
        }

        let engine = &mut self.engine;
        let renderer = &self.renderer;
        let surface = &mut self.surface;
        self.controller.on_frame(|| {
            let (width, height) = (engine.width(), engine.height());
            match renderer.draw(surface, engine.cells(), width, height) {
                Ok(()) => engine.tick(),
                Err(err) => log::error!("refusing to draw: {err}"),
            }
        });
    }

    /// One repaint outside the stride cadence, e.g. after a cell toggle.
    fn redraw(&mut self) {
        let (width, height) = (self.engine.width(), self.engine.height());
        if let Err(err) =
            self.renderer
                .draw(&mut self.surface, self.engine.cells(), width, height)
        {
            log::error!("refusing to draw: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    let _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(fern::Output::call(console_log::log))
        .apply();
}

/// Wire the harness to the host page and start playback.
///
/// The host page provides the canvas, the play/pause control, and the FPS
/// text element under stable ids, plus the `Universe` engine global; this
/// function attaches handlers and mutates their content but never creates
/// or destroys them.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start() {
    let config = ViewConfig::default();
    let window = web_sys::window().expect("could not get window");
    let document = window.document().expect("could not get document");

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .expect("could not get element with id `game-of-life-canvas` as required")
        .dyn_into()
        .expect("`game-of-life-canvas` is not a canvas");
    let button = document
        .get_element_by_id(PLAY_PAUSE_ID)
        .expect("could not get element with id `play-pause` as required");
    let readout = document
        .get_element_by_id(FPS_ID)
        .expect("could not get element with id `fps` as required");

    let layout = HexLayout::new(config.cell_size);
    let (cols_hint, rows_hint) = layout.grid_hint(config.footprint.0, config.footprint.1);
    let engine = JsEngine::create(cols_hint, rows_hint);
    let (grid_width, grid_height) = (engine.width(), engine.height());
    log::info!("engine grid {grid_width}x{grid_height} (hinted {cols_hint}x{rows_hint})");

    let (surface_width, surface_height) = layout.surface_size(grid_width, grid_height);
    canvas.set_width(surface_width);
    canvas.set_height(surface_height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .expect("could not query 2d context")
        .expect("canvas has no 2d context")
        .dyn_into()
        .expect("2d context has unexpected type");
    let surface = Canvas2d::new(
        context,
        f64::from(surface_width),
        f64::from(surface_height),
    );
    let renderer = Renderer::new(layout, config.dead_color, config.alive_color);

    let frame_callback: SharedFrameCallback = Rc::new(RefCell::new(None));
    let scheduler = RafScheduler {
        window,
        callback: Rc::clone(&frame_callback),
    };

    let app = Rc::new(RefCell::new(App {
        engine,
        renderer,
        surface,
        controller: AnimationController::new(scheduler, config.stride),
        fps: FpsCounter::new(),
        readout,
    }));

    // the seeded state is visible before the first stride boundary
    app.borrow_mut().redraw();

    {
        let app = Rc::clone(&app);
        *frame_callback.borrow_mut() = Some(Closure::new(move |now: f64| {
            app.borrow_mut().on_frame(now);
        }));
    }

    // canvas clicks toggle the cell under the pointer and repaint at once
    {
        let app = Rc::clone(&app);
        let pointer = PointerMap::new(config.cell_size);
        let handler_canvas = canvas.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let mut app = app.borrow_mut();
            let rect = handler_canvas.get_bounding_client_rect();
            let metrics = SurfaceMetrics {
                rect_left: rect.left(),
                rect_top: rect.top(),
                rect_width: rect.width(),
                rect_height: rect.height(),
                backing_width: f64::from(handler_canvas.width()),
                backing_height: f64::from(handler_canvas.height()),
            };
            let (grid_width, grid_height) = (app.engine.width(), app.engine.height());
            let (x, y) = pointer.resolve(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                &metrics,
                grid_width,
                grid_height,
            );
            app.engine.toggle_cell(x, y);
            app.redraw();
        });
        canvas
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .expect("could not attach canvas click handler");
        on_click.forget();
    }

    {
        let app = Rc::clone(&app);
        let handler_button = button.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            let mut app = app.borrow_mut();
            if app.controller.is_paused() {
                app.controller.play();
                handler_button.set_text_content(Some(GLYPH_PAUSE));
            } else {
                app.controller.pause();
                handler_button.set_text_content(Some(GLYPH_PLAY));
            }
        });
        button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .expect("could not attach play/pause handler");
        on_click.forget();
    }

    app.borrow_mut().controller.play();
    button.set_text_content(Some(GLYPH_PAUSE));
}
