//! UI modules for the landing page maps.

pub mod app_shell;
pub mod overlays;
pub mod panels;
pub mod rendering;
pub mod utils;
