pub mod filter;
pub mod log;
pub mod report;
pub mod session;
pub mod tree;
