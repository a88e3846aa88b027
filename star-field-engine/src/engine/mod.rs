pub mod camera;
pub mod catalog;
pub mod core;
pub mod filter;
pub mod loading;
pub mod picking;
pub mod scene;
pub mod systems;
