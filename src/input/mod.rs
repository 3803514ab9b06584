//! Input handling: pointer picking, keyboard shortcuts, camera orbit and the view controller.

pub mod camera;
pub mod controller;
pub mod keys;
pub mod picking;
