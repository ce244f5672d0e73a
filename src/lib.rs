pub mod core;
pub mod interval;
pub mod field;
pub mod puzzle;
pub mod scan;
pub mod candidates;
pub mod ranker;
pub mod solver;
pub mod project;
pub mod debug;
pub mod answer;
pub mod config;
pub mod logging;
