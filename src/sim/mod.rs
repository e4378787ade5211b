//! Contract with the external simulation engine.
//!
//! The automaton rules, the authoritative cell buffer, and the grid
//! dimensions all live on the engine side. This crate only reads snapshots,
//! requests steps, and forwards cell toggles.

/// Cell code for a dead cell. Fixed by contract with the engine; the buffer
/// codes must never be reinterpreted on this side.
pub const DEAD: u8 = 0;
/// Cell code for a live cell.
pub const ALIVE: u8 = 1;

pub trait SimulationEngine {
    /// Grid width, fixed for the lifetime of the engine instance.
    fn width(&self) -> u32;
    /// Grid height, fixed for the lifetime of the engine instance.
    fn height(&self) -> u32;
    /// Snapshot of the cell buffer: `width() * height()` codes in row-major
    /// order (`index = x + y * width`). The returned view is only valid
    /// until the next call to [`tick`](Self::tick) or
    /// [`toggle_cell`](Self::toggle_cell).
    fn cells(&mut self) -> &[u8];
    /// Advance the simulation one generation.
    fn tick(&mut self);
    /// Flip one cell. `x` and `y` must be inside the grid.
    fn toggle_cell(&mut self, x: u32, y: u32);
}

#[cfg(target_arch = "wasm32")]
mod external {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        /// Simulation engine exposed by the host page as a global
        /// `Universe` class.
        pub type Universe;

        #[wasm_bindgen(static_method_of = Universe, js_name = new)]
        fn create(width_hint: u32, height_hint: u32) -> Universe;

        #[wasm_bindgen(method)]
        fn width(this: &Universe) -> u32;

        #[wasm_bindgen(method)]
        fn height(this: &Universe) -> u32;

        #[wasm_bindgen(method)]
        fn cells(this: &Universe) -> js_sys::Uint8Array;

        #[wasm_bindgen(method)]
        fn tick(this: &Universe);

        #[wasm_bindgen(method)]
        fn toggle_cell(this: &Universe, x: u32, y: u32);
    }

    pub struct JsEngine {
        universe: Universe,
        scratch: Vec<u8>,
    }

    impl JsEngine {
        /// Ask the host page for an engine instance. The engine may round
        /// the hints; query `width()`/`height()` for the actual grid.
        pub fn create(width_hint: u32, height_hint: u32) -> Self {
            Self {
                universe: Universe::create(width_hint, height_hint),
                scratch: Vec::new(),
            }
        }
    }

    impl super::SimulationEngine for JsEngine {
        fn width(&self) -> u32 {
            self.universe.width()
        }

        fn height(&self) -> u32 {
            self.universe.height()
        }

        fn cells(&mut self) -> &[u8] {
            // The JS-side view aliases engine memory and is invalidated by
            // the next engine call, so each snapshot is copied out.
            let view = self.universe.cells();
            self.scratch.resize(view.length() as usize, 0);
            view.copy_to(&mut self.scratch);
            &self.scratch
        }

        fn tick(&mut self) {
            self.universe.tick();
        }

        fn toggle_cell(&mut self, x: u32, y: u32) {
            self.universe.toggle_cell(x, y);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use external::JsEngine;
