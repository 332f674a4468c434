use glium::{program, Display, Program};
use glutin::surface::WindowSurface;

use crate::error::AppError;

/// Textured program: positions go through `projection * view * model`, colour is the texture
/// sample.
pub fn textured(display: &Display<WindowSurface>) -> Result<Program, AppError> {
    let program = program! (display,
        140 => { vertex: "
                    #version 140

                    uniform mat4 model;
                    uniform mat4 view;
                    uniform mat4 projection;

                    in vec3 position;
                    in vec2 tex_coords;

                    out vec2 v_tex_coords;

                    void main() {
                        v_tex_coords = tex_coords;
                        gl_Position = projection * view * model * vec4(position, 1.0);
                    }
                ",

        fragment: "
                    #version 140

                    in vec2 v_tex_coords;
                    out vec4 f_color;

                    uniform sampler2D u_texture;

                    void main() {
                        f_color = texture(u_texture, v_tex_coords);
                    }
                ",
    })?;
    Ok(program)
}
