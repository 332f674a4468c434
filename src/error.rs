use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop the program from starting or from drawing a frame.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to create event loop")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to build shader program")]
    Shader(#[from] glium::program::ProgramChooserCreationError),
    #[error("failed to load texture {}", path.display())]
    TextureLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to upload texture")]
    TextureUpload(#[from] glium::texture::TextureCreationError),
    #[error("failed to create vertex buffer")]
    VertexBuffer(#[from] glium::vertex::BufferCreationError),
    #[error("failed to create index buffer")]
    IndexBuffer(#[from] glium::index::BufferCreationError),
    #[error("drawable `{drawable}` refers to texture slot {slot}, but only {available} are loaded")]
    MissingTexture {
        drawable: String,
        slot: usize,
        available: usize,
    },
    #[error("draw call failed")]
    Draw(#[from] glium::DrawError),
    #[error("failed to swap buffers")]
    SwapBuffers(#[from] glium::SwapBuffersError),
}
