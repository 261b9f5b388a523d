//! Assessor TUI: terminal wizard over `assessor-core`.
//!
//! Screens:
//! - Home: pick an assessment
//! - PD: personal-data protection level
//! - GIS: information system protection class
//!
//! Keyboard and mouse both drive the same [`screens::Action`]s. Classification
//! calls run on a background worker so the UI never waits on the network.

pub mod app;
pub mod config;
pub mod hit;
pub mod input;
pub mod logging;
pub mod screens;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use theme::Theme;
