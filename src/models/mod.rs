pub mod config;
pub mod feed_item;
pub mod seen;
pub mod subscription;
