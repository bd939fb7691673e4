pub mod candidate;
pub mod resolve;
pub mod role;
