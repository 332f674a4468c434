use glam::Mat4;

use crate::{
    camera::Camera,
    config::{Placement, ProjectionOptions},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        }
    }
}

/// Framebuffer size in pixels, queried once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Falls back to 1.0 for a minimised (zero height) window.
    pub fn aspect_ratio(self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl From<(u32, u32)> for Viewport {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Transforms {
    /// Column-major arrays, the layout GL uniforms expect.
    pub fn to_uniform_arrays(&self) -> [[[f32; 4]; 4]; 3] {
        [
            self.model.to_cols_array_2d(),
            self.view.to_cols_array_2d(),
            self.projection.to_cols_array_2d(),
        ]
    }
}

/// `translation * rotation * scale`, so the object is scaled first and translated last.
///
/// A zero rotation axis leaves the rotation out rather than producing NaNs.
pub fn model_matrix(placement: &Placement) -> Mat4 {
    let scale = Mat4::from_scale(placement.scale);
    let rotation = placement
        .rotation_axis
        .try_normalize()
        .map_or(Mat4::IDENTITY, |axis| {
            Mat4::from_axis_angle(axis, placement.rotation_degrees.to_radians())
        });
    let translation = Mat4::from_translation(placement.translation);
    translation * rotation * scale
}

pub fn projection_matrix(
    camera: &Camera,
    viewport: Viewport,
    mode: ProjectionMode,
    options: &ProjectionOptions,
) -> Mat4 {
    match mode {
        ProjectionMode::Orthographic => {
            let half_width = viewport.width as f32 / options.ortho_scale;
            let half_height = viewport.height as f32 / options.ortho_scale;
            Mat4::orthographic_rh_gl(
                -half_width,
                half_width,
                -half_height,
                half_height,
                options.ortho_near,
                options.ortho_far,
            )
        }
        ProjectionMode::Perspective => Mat4::perspective_rh_gl(
            camera.zoom().to_radians(),
            viewport.aspect_ratio(),
            options.perspective_near,
            options.perspective_far,
        ),
    }
}

pub fn compose_transforms(
    placement: &Placement,
    camera: &Camera,
    viewport: Viewport,
    mode: ProjectionMode,
    options: &ProjectionOptions,
) -> Transforms {
    Transforms {
        model: model_matrix(placement),
        view: camera.view_matrix(),
        projection: projection_matrix(camera, viewport, mode, options),
    }
}
