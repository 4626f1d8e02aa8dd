pub mod task_queue;

pub use task_queue::{DISK_QUEUE, Executors, NETWORK_QUEUE, QueueError, TaskHandle, TaskQueue};
