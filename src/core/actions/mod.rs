pub mod cancellation;
pub mod dispatch_tiles;
pub mod render;
