pub mod chatwork_sender;
pub mod feed_monitor;
pub mod scheduler;
