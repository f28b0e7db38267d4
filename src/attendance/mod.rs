pub mod duration;
pub mod query;
pub mod replicate;
pub mod session;
pub mod status;
