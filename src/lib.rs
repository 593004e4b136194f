pub mod config;
pub mod output;
pub mod scoring;
pub mod stderr_buffer;
pub mod telemetry;
pub mod tui;
