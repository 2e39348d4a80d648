pub mod config;
pub mod lens;
pub mod simulate;
