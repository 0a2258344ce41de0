pub mod gpu_context;
pub mod pipeline;
pub mod screen;
pub mod text;
pub mod texture;

pub use gpu_context::GpuContext;
pub use pipeline::{SpritePipeline, SpriteVertex};
pub use screen::{ScreenProjection, ScreenUniform};
pub use texture::Texture;
