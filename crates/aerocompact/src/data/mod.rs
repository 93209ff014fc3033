pub mod elevation;
pub mod fields;
pub mod ourairports;
