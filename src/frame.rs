use std::collections::HashMap;

use glium::{
    texture::SrgbTexture2d,
    uniform,
    uniforms::{MagnifySamplerFilter, MinifySamplerFilter, SamplerWrapFunction},
    Display, DrawParameters, Frame, Program, Surface,
};
use glutin::surface::WindowSurface;

use crate::{
    config::Config,
    error::AppError,
    mesh::{GpuMesh, MeshKind},
    scene::Scene,
    shader,
    texture,
    transform::Viewport,
};

/// Plain bilinear sampling in both directions; mipmaps are generated but not sampled.
const TEXTURE_FILTERS: (MinifySamplerFilter, MagnifySamplerFilter) =
    (MinifySamplerFilter::Linear, MagnifySamplerFilter::Linear);

/// GPU side of the demo: one program, the uploaded meshes and the texture slots.
pub struct Renderer {
    params: DrawParameters<'static>,
    program: Program,
    meshes: HashMap<MeshKind, GpuMesh>,
    textures: Vec<SrgbTexture2d>,
    clear_color: (f32, f32, f32, f32),
}

impl Renderer {
    pub fn new(display: &Display<WindowSurface>, config: &Config) -> Result<Self, AppError> {
        let program = shader::textured(display)?;

        let meshes = MeshKind::ALL
            .into_iter()
            .map(|kind| GpuMesh::upload(display, kind).map(|mesh| (kind, mesh)))
            .collect::<Result<HashMap<_, _>, AppError>>()?;

        let textures = config
            .textures
            .iter()
            .map(|path| texture::load(display, path))
            .collect::<Result<Vec<_>, _>>()?;

        let [r, g, b, a] = config.window.clear_color;
        Ok(Self {
            params: glium::DrawParameters {
                depth: glium::Depth {
                    test: glium::DepthTest::IfLess,
                    write: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            program,
            meshes,
            textures,
            clear_color: (r, g, b, a),
        })
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Clears, then draws every drawable of `scene` with its own model matrix.
    pub fn draw_frame(&self, target: &mut Frame, scene: &Scene) -> Result<(), AppError> {
        target.clear_color_and_depth(self.clear_color, 1.0);

        let viewport = Viewport::from(target.get_dimensions());
        for (drawable, transforms) in scene.transforms(viewport) {
            // both are checked at startup
            let (Some(mesh), Some(texture)) = (
                self.meshes.get(&drawable.mesh),
                self.textures.get(drawable.texture),
            ) else {
                log::warn!("skipping `{}`: missing mesh or texture", drawable.name);
                continue;
            };

            let [model, view, projection] = transforms.to_uniform_arrays();
            let sampler = texture
                .sampled()
                .wrap_function(SamplerWrapFunction::Repeat)
                .minify_filter(TEXTURE_FILTERS.0)
                .magnify_filter(TEXTURE_FILTERS.1);
            let uniforms = uniform! {
                model: model,
                view: view,
                projection: projection,
                u_texture: sampler,
            };

            target.draw(
                &mesh.vertex_buffer,
                &mesh.index_buffer,
                &self.program,
                &uniforms,
                &self.params,
            )?;
        }
        log::trace!("drew {} objects at {viewport:?}", scene.drawables().len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textures_use_linear_filtering() {
        assert_eq!(TEXTURE_FILTERS.0, MinifySamplerFilter::Linear);
        assert_eq!(TEXTURE_FILTERS.1, MagnifySamplerFilter::Linear);
    }
}
