pub mod colour;
pub mod pixel_buffer;
pub mod point;
pub mod precision_complex;
pub mod tile;
pub mod view_parameters;
