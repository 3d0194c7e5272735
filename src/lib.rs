//! tabletalk - keyword-driven data exploration for CSV files

pub mod chart;
pub mod command;
pub mod core;
pub mod intent;
pub mod session;
pub mod table;
pub mod ui;
