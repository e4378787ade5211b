pub mod fps;
pub mod pointer;

pub use fps::{FpsCounter, FpsSummary};
pub use pointer::{PointerMap, SurfaceMetrics};
