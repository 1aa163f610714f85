pub mod tile_dispatcher;

pub use tile_dispatcher::{DispatchError, DispatchReport, DispatchState, TileDispatcher, TileFailure};
