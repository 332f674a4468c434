use crate::{
    camera::Camera,
    config::{Config, Drawable, ProjectionOptions},
    error::AppError,
    input::FrameInput,
    transform::{compose_transforms, ProjectionMode, Transforms, Viewport},
};

/// Per-frame state of the demo: the camera, the projection toggle and the table of things to
/// draw. The renderer only reads it.
#[derive(Debug)]
pub struct Scene {
    pub camera: Camera,
    pub projection_mode: ProjectionMode,
    projection: ProjectionOptions,
    drawables: Vec<Drawable>,
}

impl Scene {
    pub fn new(config: &Config) -> Self {
        let projection_mode = if config.projection.start_orthographic {
            ProjectionMode::Orthographic
        } else {
            ProjectionMode::Perspective
        };
        Self {
            camera: Camera::from_options(&config.camera),
            projection_mode,
            projection: config.projection.clone(),
            drawables: config.drawables.clone(),
        }
    }

    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    /// Fails on the first drawable that points past the loaded textures.
    pub fn check_textures(&self, available: usize) -> Result<(), AppError> {
        match self.drawables.iter().find(|d| d.texture >= available) {
            Some(drawable) => Err(AppError::MissingTexture {
                drawable: drawable.name.clone(),
                slot: drawable.texture,
                available,
            }),
            None => Ok(()),
        }
    }

    pub fn update(&mut self, input: &FrameInput, delta_time: f32) {
        if input.toggle_projection {
            self.projection_mode = self.projection_mode.toggled();
            log::debug!("projection mode now {:?}", self.projection_mode);
        }

        for &movement in &input.movements {
            self.camera.process_keyboard(movement, delta_time);
        }
        if !input.movements.is_empty() {
            log::trace!("position {}", self.camera.position());
        }

        for &(x_offset, y_offset) in &input.mouse_offsets {
            self.camera.process_mouse_movement(x_offset, y_offset, true);
        }
        if !input.mouse_offsets.is_empty() {
            log::trace!(
                "yaw {:.1} pitch {:.1} front {} right {} up {}",
                self.camera.yaw(),
                self.camera.pitch(),
                self.camera.front(),
                self.camera.right(),
                self.camera.up()
            );
        }

        if input.scroll != 0.0 {
            self.camera.process_mouse_scroll(input.scroll);
            log::debug!("zoom now {:.1} degrees", self.camera.zoom());
        }
    }

    pub fn transforms(&self, viewport: Viewport) -> impl Iterator<Item = (&Drawable, Transforms)> + '_ {
        self.drawables.iter().map(move |drawable| {
            let transforms = compose_transforms(
                &drawable.placement,
                &self.camera,
                viewport,
                self.projection_mode,
                &self.projection,
            );
            (drawable, transforms)
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::Movement;

    #[test]
    fn default_scene_references_loaded_texture() {
        let scene = Scene::new(&Config::default());
        assert_eq!(scene.drawables().len(), 4);
        assert!(scene.check_textures(1).is_ok());
        assert!(matches!(
            scene.check_textures(0),
            Err(AppError::MissingTexture { slot: 0, available: 0, .. })
        ));
    }

    #[test]
    fn update_applies_frame_input() {
        let mut scene = Scene::new(&Config::default());
        let start = scene.camera.position();
        scene.update(
            &FrameInput {
                movements: vec![Movement::Forward],
                mouse_offsets: Vec::new(),
                scroll: 5.0,
                toggle_projection: true,
            },
            0.5,
        );
        assert_eq!(scene.projection_mode, ProjectionMode::Orthographic);
        assert_eq!(scene.camera.zoom(), 40.0);
        assert!(scene
            .camera
            .position()
            .abs_diff_eq(start + Vec3::new(0.0, 0.0, -1.25), 1e-5));
    }

    #[test]
    fn zero_delta_time_leaves_camera_in_place() {
        let mut scene = Scene::new(&Config::default());
        let start = scene.camera.position();
        let frame = FrameInput {
            movements: Movement::ALL.to_vec(),
            ..FrameInput::default()
        };
        scene.update(&frame, 0.0);
        assert_eq!(scene.camera.position(), start);
    }

    #[test]
    fn every_drawable_shares_view_and_projection() {
        let scene = Scene::new(&Config::default());
        let all: Vec<Transforms> = scene
            .transforms(Viewport::new(800, 600))
            .map(|(_, t)| t)
            .collect();
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| w[0].view == w[1].view && w[0].projection == w[1].projection));
        assert_ne!(all[1].model, all[2].model);
    }

    #[test]
    fn pitch_clamps_per_cursor_sample() {
        let mut config = Config::default();
        config.camera.pitch = 89.0;
        let mut scene = Scene::new(&config);
        // 20 px at 0.1 degrees/px: clamped at 89 on the way up, then 2 degrees back down
        let frame = FrameInput {
            mouse_offsets: vec![(0.0, 20.0), (0.0, -20.0)],
            ..FrameInput::default()
        };
        scene.update(&frame, 0.016);
        assert!((scene.camera.pitch() - 87.0).abs() < 1e-4);
    }

    #[test]
    fn start_orthographic_is_honoured() {
        let mut config = Config::default();
        config.projection.start_orthographic = true;
        assert_eq!(Scene::new(&config).projection_mode, ProjectionMode::Orthographic);
    }
}
