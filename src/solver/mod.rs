pub mod config;
pub mod error;
pub mod observer;
pub mod policy;
pub mod render;
pub mod report;
pub mod solver;
