//! Camera auto-fit: distance needed for a perspective camera to frame the diagram bounds.

use bevy::prelude::*;

use super::layout::Bounds;
use crate::core::config::ViewerConfig;

/// Smallest extent used for a bounding box side; keeps single-point diagrams finite.
const MIN_EXTENT: f32 = 0.001;

/// Parameters that stay fixed across re-fits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    pub fov_degrees: f32,
    pub padding: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            fov_degrees: 42.0,
            padding: 1.25,
            min_distance: 6.2,
            max_distance: 16.0,
        }
    }
}

impl From<&ViewerConfig> for FitParams {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            fov_degrees: config.fov_degrees,
            padding: config.fit_padding,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
        }
    }
}

/// Viewport size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_degrees: f32,
}

impl CameraPose {
    pub fn distance(&self) -> f32 {
        self.position.distance(self.look_at)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.look_at, Vec3::Y)
    }
}

/// Unclamped distance at which a box of `size` fits a `vfov_rad` camera with `aspect`.
pub fn required_distance(size: Vec2, vfov_rad: f32, aspect: f32, padding: f32) -> f32 {
    let size_x = size.x.max(MIN_EXTENT);
    let size_y = size.y.max(MIN_EXTENT);
    let half_v = (vfov_rad / 2.0).tan();
    let hfov = 2.0 * (half_v * aspect).atan();
    let dist_y = (size_y / 2.0) / half_v;
    let dist_x = (size_x / 2.0) / (hfov / 2.0).tan();
    dist_x.max(dist_y) * padding
}

/// Square-on pose centered on `centroid` that frames `bounds`.
pub fn fit_camera(centroid: Vec3, bounds: &Bounds, viewport: Viewport, params: &FitParams) -> CameraPose {
    let distance = required_distance(
        bounds.size(),
        params.fov_degrees.to_radians(),
        viewport.aspect(),
        params.padding,
    )
    .clamp(params.min_distance, params.max_distance);

    CameraPose {
        position: Vec3::new(centroid.x, centroid.y, distance),
        look_at: Vec3::new(centroid.x, centroid.y, 0.0),
        fov_degrees: params.fov_degrees,
    }
}
