pub mod partition_canvas;
pub mod plane_mapping;
pub mod worker_count;
