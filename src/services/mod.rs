pub mod resize;
pub mod staging;
