pub mod camera;
pub mod plugin;
pub mod terrain;
pub mod trails;
pub mod ui;
