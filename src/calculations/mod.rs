pub mod block_scan;
pub mod row_times;
pub mod stages;
