//! Commute dashboard: loads ladybug/walking trip records, aggregates them per
//! mode and per hour, and lays the resulting charts out for an egui window.

pub mod aggregate;
pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod state;
pub mod ui;
