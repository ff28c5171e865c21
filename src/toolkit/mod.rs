//! Deterministic Analysis Toolkit
//!
//! Small, pure calculations shared by the agents' declared toolsets, the
//! local fallback reporter, and the visualization builders:
//!
//! - `deviation`: directional deviation against `[min, max]` tolerance bounds
//! - `trend`: least-squares slope classification for ordered series
//! - `outliers`: z-score outlier flagging (population standard deviation)
//!
//! None of these functions return errors — degenerate input degrades to a
//! neutral result ("no reference", insufficient data, empty list).

pub mod deviation;
pub mod outliers;
pub mod trend;

pub use deviation::describe;
pub use outliers::{outliers, Outlier};
pub use trend::{trend, TrendLabel};
