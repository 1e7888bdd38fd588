//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod csv_event_writer;
pub mod file_config_adapter;
