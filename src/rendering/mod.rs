//! Hexagon-tile rendering of the engine's cell buffer.
//!
//! Drawing goes through the [`DrawSurface`] trait so the scan/fill logic can
//! be exercised against a recording surface without a browser.

pub mod layout;

use anyhow::{Result, ensure};

use crate::sim::ALIVE;
use crate::util::Color;
use layout::{HexLayout, cell_index};

pub trait DrawSurface {
    /// Backing-store size in pixels.
    fn size(&self) -> (f64, f64);
    fn set_fill_color(&mut self, color: Color);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// Fill the closed polygon through `points`, in order.
    fn fill_polygon(&mut self, points: &[(f64, f64)]);
}

pub struct Renderer {
    layout: HexLayout,
    dead_color: Color,
    alive_color: Color,
}

impl Renderer {
    pub fn new(layout: HexLayout, dead_color: Color, alive_color: Color) -> Self {
        Self {
            layout,
            dead_color,
            alive_color,
        }
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    /// Repaint the whole surface from a cell-buffer snapshot.
    ///
    /// One background fill covers every dead cell, then the fill color is
    /// switched once and live cells are drawn in row-major order. Changing
    /// the fill style per shape is costly; batching by color class keeps
    /// that cost at two switches per frame.
    pub fn draw<S: DrawSurface>(
        &self,
        surface: &mut S,
        cells: &[u8],
        width: u32,
        height: u32,
    ) -> Result<()> {
        ensure!(
            cells.len() == width as usize * height as usize,
            "cell buffer holds {} entries for a {width}x{height} grid",
            cells.len(),
        );

        let (surface_width, surface_height) = surface.size();
        surface.set_fill_color(self.dead_color);
        surface.fill_rect(0.0, 0.0, surface_width, surface_height);

        surface.set_fill_color(self.alive_color);
        for y in 0..height {
            for x in 0..width {
                if cells[cell_index(x, y, width)] != ALIVE {
                    continue;
                }
                let (cx, cy) = self.layout.center(x, y);
                surface.fill_polygon(&self.layout.vertices(cx, cy));
            }
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub struct Canvas2d {
    context: web_sys::CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

#[cfg(target_arch = "wasm32")]
impl Canvas2d {
    pub fn new(context: web_sys::CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self {
            context,
            width,
            height,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl DrawSurface for Canvas2d {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn set_fill_color(&mut self, color: Color) {
        self.context.set_fill_style_str(&color.css());
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.context.fill_rect(x, y, w, h);
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)]) {
        let Some((&(first_x, first_y), rest)) = points.split_first() else {
            return;
        };
        self.context.begin_path();
        self.context.move_to(first_x, first_y);
        for &(x, y) in rest {
            self.context.line_to(x, y);
        }
        self.context.close_path();
        self.context.fill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::DEAD;

    const DEAD_COLOR: Color = Color::rgb(0x11, 0x11, 0x11);
    const ALIVE_COLOR: Color = Color::rgb(0xFF, 0xAA, 0x00);

    #[derive(Default)]
    struct RecordingSurface {
        size: (f64, f64),
        fill_color: Option<Color>,
        color_switches: usize,
        rects: Vec<(Color, f64, f64, f64, f64)>,
        polygons: Vec<(Color, Vec<(f64, f64)>)>,
    }

    impl DrawSurface for RecordingSurface {
        fn size(&self) -> (f64, f64) {
            self.size
        }

        fn set_fill_color(&mut self, color: Color) {
            if self.fill_color != Some(color) {
                self.color_switches += 1;
            }
            self.fill_color = Some(color);
        }

        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
            self.rects.push((self.fill_color.unwrap(), x, y, w, h));
        }

        fn fill_polygon(&mut self, points: &[(f64, f64)]) {
            self.polygons
                .push((self.fill_color.unwrap(), points.to_vec()));
        }
    }

    fn renderer() -> Renderer {
        Renderer::new(HexLayout::new(5.0), DEAD_COLOR, ALIVE_COLOR)
    }

    #[test]
    fn lone_live_cell_renders_one_hexagon() {
        let mut cells = vec![DEAD; 12];
        cells[0] = ALIVE;
        let mut surface = RecordingSurface {
            size: (40.0, 30.0),
            ..Default::default()
        };

        renderer().draw(&mut surface, &cells, 4, 3).unwrap();

        assert_eq!(surface.rects.len(), 1);
        assert_eq!(surface.rects[0], (DEAD_COLOR, 0.0, 0.0, 40.0, 30.0));
        assert_eq!(surface.polygons.len(), 1);
        let (color, points) = &surface.polygons[0];
        assert_eq!(*color, ALIVE_COLOR);
        // rightmost vertex of the hexagon centered on cell (0, 0)
        assert_eq!(points[0], (5.0, 0.0));
    }

    #[test]
    fn fill_color_switches_twice_per_frame() {
        let cells = vec![ALIVE; 16];
        let mut surface = RecordingSurface::default();

        renderer().draw(&mut surface, &cells, 4, 4).unwrap();

        assert_eq!(surface.polygons.len(), 16);
        assert_eq!(surface.color_switches, 2);
    }

    #[test]
    fn live_cells_land_on_their_staggered_centers() {
        let cells = vec![ALIVE; 4];
        let mut surface = RecordingSurface::default();
        let renderer = renderer();

        renderer.draw(&mut surface, &cells, 2, 2).unwrap();

        let expected = [(0u32, 0u32), (1, 0), (0, 1), (1, 1)];
        assert_eq!(surface.polygons.len(), expected.len());
        for ((_, points), &(x, y)) in surface.polygons.iter().zip(&expected) {
            let (cx, cy) = renderer.layout().center(x, y);
            let (vx, vy) = points[0];
            assert!(
                (vx - (cx + 5.0)).abs() < 1e-9 && (vy - cy).abs() < 1e-9,
                "cell ({x}, {y}) drawn at ({vx}, {vy}), center ({cx}, {cy})"
            );
        }
    }

    #[test]
    fn empty_grid_draws_background_only() {
        let mut surface = RecordingSurface {
            size: (10.0, 10.0),
            ..Default::default()
        };

        renderer().draw(&mut surface, &[], 0, 5).unwrap();

        assert_eq!(surface.rects.len(), 1);
        assert!(surface.polygons.is_empty());
    }

    #[test]
    fn mismatched_buffer_is_refused_before_any_drawing() {
        let mut surface = RecordingSurface::default();

        let result = renderer().draw(&mut surface, &[DEAD; 5], 4, 3);

        assert!(result.is_err());
        assert!(surface.rects.is_empty());
        assert!(surface.polygons.is_empty());
    }

    #[test]
    fn non_contract_codes_are_not_drawn_alive() {
        // only the exact ALIVE code fills a hexagon
        let cells = vec![DEAD, ALIVE, 2, 3];
        let mut surface = RecordingSurface::default();

        renderer().draw(&mut surface, &cells, 4, 1).unwrap();

        assert_eq!(surface.polygons.len(), 1);
    }
}
