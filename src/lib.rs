//! Recenters OBJ mesh assets: X and Y around the bounding-box midpoint, Z onto
//! the `z = 0` floor. Vertex lines are rewritten, every other line is copied
//! verbatim.

pub mod batch;
pub mod core;
pub mod error;
pub mod io;

pub use batch::driver::{BatchDriver, BatchEvent, BatchReport};
pub use error::{FixError, Result};
pub use io::config::Config;
