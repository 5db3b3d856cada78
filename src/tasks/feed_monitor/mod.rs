pub mod diff;
pub mod fetcher;
