pub mod cell_value;
pub mod dataset;
