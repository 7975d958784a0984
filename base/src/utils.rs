
pub mod cast;
pub mod frame;
