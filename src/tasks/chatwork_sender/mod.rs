pub mod message;
pub mod report;
