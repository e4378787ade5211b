//! Pixel geometry for the staggered hexagon tiling.
//!
//! Columns sit `3.3 * cell_size` apart, odd rows are shifted by half a
//! column, and rows advance by one `cell_size`. The `1.1` margin factor is
//! shared between the grid hint and the backing-store size so hit-testing
//! stays consistent with rendering.

/// Vertical half-height of a unit hexagon's slanted edge, `sqrt(3) / 2`.
pub const SQRT3_2: f64 = 0.866_025_403_784_438_6;

const MARGIN: f64 = 1.1;
/// Horizontal half-pitch between columns, in cell units.
const HALF_COLUMN: f64 = 1.5 * MARGIN;
const COLUMN_PITCH: f64 = 2.0 * HALF_COLUMN;

/// Row-major buffer index for grid cell `(x, y)`.
pub fn cell_index(x: u32, y: u32, width: u32) -> usize {
    (x + y * width) as usize
}

#[derive(Clone, Copy, Debug)]
pub struct HexLayout {
    cell_size: f64,
}

impl HexLayout {
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size }
    }

    /// Pixel center of grid cell `(x, y)`. Odd rows are offset by half a
    /// column, producing the honeycomb stagger.
    pub fn center(&self, x: u32, y: u32) -> (f64, f64) {
        let stagger = f64::from(y % 2) / 2.0;
        (
            COLUMN_PITCH * (f64::from(x) + stagger) * self.cell_size,
            f64::from(y) * self.cell_size,
        )
    }

    /// The six outline vertices around `(cx, cy)`, starting at the rightmost
    /// point and winding clockwise in screen space (y grows downward). The
    /// order keeps the filled path simple.
    pub fn vertices(&self, cx: f64, cy: f64) -> [(f64, f64); 6] {
        let r = self.cell_size;
        let half = r * 0.5;
        let rise = r * SQRT3_2;
        [
            (cx + r, cy),
            (cx + half, cy + rise),
            (cx - half, cy + rise),
            (cx - r, cy),
            (cx - half, cy - rise),
            (cx + half, cy - rise),
        ]
    }

    /// Grid dimensions that fill the desired pixel footprint. The engine may
    /// round these hints; size the surface from its actual dimensions.
    pub fn grid_hint(&self, px_width: f64, px_height: f64) -> (u32, u32) {
        let cols = (px_width / (self.cell_size * HALF_COLUMN) + 1.0).ceil() / 2.0;
        let rows = (px_height / self.cell_size + SQRT3_2 * MARGIN).ceil();
        (cols as u32, rows as u32)
    }

    /// Canvas backing-store size for the actual grid dimensions.
    pub fn surface_size(&self, grid_width: u32, grid_height: u32) -> (u32, u32) {
        let columns_span = f64::from((2 * grid_width).saturating_sub(1));
        let width = self.cell_size * columns_span * HALF_COLUMN;
        let height = self.cell_size * (f64::from(grid_height) - SQRT3_2 * MARGIN);
        (width as u32, height as u32)
    }
}
