pub mod app;
pub mod cube;
pub mod theme;
pub mod window;
