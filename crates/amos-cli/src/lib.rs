//! Library components of the `amos-filter` command.

pub mod batch;
pub mod logging;
pub mod pipeline;
pub mod types;
