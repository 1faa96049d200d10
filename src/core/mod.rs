pub mod aggregate;
pub mod csv;
pub mod format;
pub mod matrix;
pub mod normalize;
pub mod pipeline;
pub mod stats;
