pub mod capture;
pub mod core;
pub mod shared;
pub mod utils;
