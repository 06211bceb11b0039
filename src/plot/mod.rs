pub mod curves;
pub mod frames;
