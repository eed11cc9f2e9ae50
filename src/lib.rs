//! Gang scheduling simulator: all-or-nothing processor allocation, fixed time
//! slices, strict FIFO admission, per-processor idle/busy accounting.

pub mod gang;
pub mod pool;
pub mod queue;
pub mod report;
pub mod scheduler;
pub mod workload;
