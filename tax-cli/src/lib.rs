pub mod app;
pub mod batch;
pub mod logging;
pub mod profile_csv;
pub mod render;
pub mod utils;
