//! All mutable presentation state: window, GPU resources, the entity
//! store, the audio mixer, and the input session. Implements the driver's
//! `Stage` interface.
//!
//! Ownership falls into three groups:
//!  - **Core state** (session, screen projection) -- mutated every tick
//!  - **Content** (entity store, textures, audio clips) -- loaded once at
//!    startup, fixed membership thereafter
//!  - **GPU resources** (vertex/index/uniform buffers) -- streamed into
//!    each frame

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use gb_audio::Mixer;
use gb_core::driver::Stage;
use gb_core::event::Event;
use gb_core::session::Session;
use gb_render::{GpuContext, ScreenProjection, SpritePipeline, SpriteVertex};

use crate::entities::{self, Entity, GpuSpriteTexture};
use crate::render;

const MUSIC_PATH: &str = "assets/music/frantic-gameplay.ogg";
const CLICK_PATH: &str = "assets/sounds/click.wav";

/// The scene is bounded: backdrop + gopher + label, with headroom.
const MAX_QUADS: usize = 8;

pub struct Booth {
    pub window: Arc<Window>,
    gpu: GpuContext,
    pipeline: SpritePipeline,
    screen: ScreenProjection,
    screen_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    textures: HashMap<Arc<str>, GpuSpriteTexture>,
    entities: Vec<Entity>,
    session: Session,
    mixer: Mixer,
}

impl Booth {
    pub fn new(window: Arc<Window>) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let screen = ScreenProjection::new(gpu.size.0, gpu.size.1);

        let screen_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Screen Uniform Buffer"),
                contents: bytemuck::cast_slice(&[screen.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let screen_bind_group = pipeline.create_screen_bind_group(&gpu.device, &screen_buffer);

        let vertex_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Entity Vertex Buffer"),
            size: (MAX_QUADS * 4 * std::mem::size_of::<SpriteVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Entity Index Buffer"),
            size: (MAX_QUADS * 6 * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let (entities, textures) = entities::build(&gpu, &pipeline)?;

        let mut mixer = Mixer::new()?;
        match mixer.load_clip(Path::new(CLICK_PATH)) {
            Ok(clip) => mixer.set_click(clip),
            Err(err) => log::warn!("{err}; clicks will be silent"),
        }
        if let Err(err) = mixer.play_music(Path::new(MUSIC_PATH), true) {
            log::warn!("{err}; continuing without music");
        }

        Ok(Self {
            window,
            gpu,
            pipeline,
            screen,
            screen_buffer,
            screen_bind_group,
            vertex_buffer,
            index_buffer,
            textures,
            entities,
            session: Session::new(),
            mixer,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.screen.viewport = (width, height);
    }

    fn render_frame(&mut self) {
        let draw_list = render::build_draw_list(&self.entities, &self.session, self.gpu.size);
        let mut vertices = Vec::with_capacity(draw_list.len() * 4);
        let mut indices = Vec::with_capacity(draw_list.len() * 6);
        let batches = render::build_mesh(&draw_list, &mut vertices, &mut indices);

        self.gpu.queue.write_buffer(
            &self.screen_buffer,
            0,
            bytemuck::cast_slice(&[self.screen.build_uniform()]),
        );
        if !vertices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
            self.gpu
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&indices));
        }

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Entity Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline.render_pipeline);
            pass.set_bind_group(0, &self.screen_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            for batch in &batches {
                if let Some(texture) = self.textures.get(&batch.texture) {
                    pass.set_bind_group(1, &texture.bind_group, &[]);
                    pass.draw_indexed(
                        batch.index_start..(batch.index_start + batch.index_count),
                        0,
                        0..1,
                    );
                }
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl Stage for Booth {
    fn on_event(&mut self, event: &Event) {
        self.session.handle_event(event, &mut self.mixer);
    }

    fn update(&mut self, _dt: f64) {
        // Fixed per-tick increments; the wall-clock delta is diagnostics
        // only (see gb_core::frame).
        self.session.advance();
    }

    fn draw(&mut self, _dt: f64) {
        self.render_frame();
    }

    fn quit_requested(&self) -> bool {
        self.session.quit_requested()
    }
}
