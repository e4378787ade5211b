//! Pointer-click to grid-cell mapping.

/// Where the canvas sits on the page, and how large its pixel buffer is.
/// The CSS box and the backing store may differ in size; the scale between
/// them has to be undone before any grid math.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceMetrics {
    pub rect_left: f64,
    pub rect_top: f64,
    pub rect_width: f64,
    pub rect_height: f64,
    pub backing_width: f64,
    pub backing_height: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct PointerMap {
    cell_size: f64,
}

impl PointerMap {
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size }
    }

    /// Resolve a click at page coordinates to a grid cell.
    ///
    /// Clicks outside the grid clamp into range instead of being rejected.
    /// The `cell_size + 1` divisor is a bounding-box approximation of the
    /// hexagon pitch, kept for compatibility with paired host pages.
    pub fn resolve(
        &self,
        client_x: f64,
        client_y: f64,
        metrics: &SurfaceMetrics,
        grid_width: u32,
        grid_height: u32,
    ) -> (u32, u32) {
        let scale_x = metrics.backing_width / metrics.rect_width;
        let scale_y = metrics.backing_height / metrics.rect_height;
        let canvas_left = (client_x - metrics.rect_left) * scale_x;
        let canvas_top = (client_y - metrics.rect_top) * scale_y;

        let pitch = self.cell_size + 1.0;
        let x = (canvas_left / pitch)
            .floor()
            .clamp(0.0, f64::from(grid_width.saturating_sub(1)));
        let y = (canvas_top / pitch)
            .floor()
            .clamp(0.0, f64::from(grid_height.saturating_sub(1)));
        (x as u32, y as u32)
    }
}
