pub mod app;
pub mod board;
pub mod painter;
pub mod theme;
