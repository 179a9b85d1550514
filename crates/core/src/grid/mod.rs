//! Sample grid over the plot domain

pub mod sample_grid;

pub use sample_grid::SampleGrid;
