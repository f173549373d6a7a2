pub mod blacklist;
pub mod config;
pub mod soap;
pub mod telemetry;
pub mod xmds;
