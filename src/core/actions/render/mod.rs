pub mod render_engine;
pub mod render_full_frame;
pub mod render_tile;
pub mod render_tiled_canvas;

pub use render_engine::{RenderEngine, RenderError};
pub use render_tiled_canvas::{RECEIVER_CLOSED, TiledRender};
