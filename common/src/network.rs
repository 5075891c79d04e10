pub mod device;
pub mod interface;
pub mod range;
