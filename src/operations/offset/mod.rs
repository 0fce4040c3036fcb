mod buffer;
mod filter;
mod join;
mod parallel;

pub use buffer::{Buffer2D, BufferOptions};
pub use join::CapStyle;
pub use parallel::ParallelCurve2D;
