pub mod apple;
pub mod config;
pub mod entity;
pub mod error;
pub mod feed;
pub mod game;
pub mod grid;
pub mod headless;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
