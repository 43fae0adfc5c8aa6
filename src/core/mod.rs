//! Shared core types: geographic coordinates, the screen state and the camera.

pub mod camera;
pub mod coordinates;
pub mod screen;
