//! Layout, camera framing, focus weights and the Bevy scene built from them.

pub mod camera_fit;
pub mod edges;
pub mod focus;
pub mod layout;
pub mod scene;
