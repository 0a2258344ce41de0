//! The fixed entity store: one backdrop, three gophers, three labels,
//! constructed once at startup. Insertion order is draw order, so the
//! backdrop goes in first.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use gb_core::sheet::{self, Rect};
use gb_core::state::GopherState;
use gb_render::{text, GpuContext, SpritePipeline, Texture};

const BACKDROP_PATH: &str = "assets/images/BackdropBlackLittleSparkBlack.png";
const SHEET_PATH: &str = "assets/images/sprite.png";
const FONT_PATH: &str = "assets/fonts/skranji.regular.ttf";
const LABEL_SIZE_PX: f32 = 32.0;

pub struct GpuSpriteTexture {
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

/// One renderable entity. Each variant carries only the fields it needs;
/// the tag is matched at render time.
#[derive(Debug, Clone)]
pub enum Entity {
    Background {
        texture: Arc<str>,
    },
    Gopher {
        texture: Arc<str>,
        sheet_size: (u32, u32),
        clips: [Rect; sheet::CLIP_COUNT],
        state: GopherState,
    },
    Label {
        texture: Arc<str>,
        width: u32,
        height: u32,
        state: GopherState,
    },
}

/// Build the entity store and its texture table. Called exactly once.
///
/// Backdrop, sprite sheet and font failures are fatal; a single label that
/// fails to pre-render degrades to a missing caption for that state.
pub fn build(
    gpu: &GpuContext,
    pipeline: &SpritePipeline,
) -> Result<(Vec<Entity>, HashMap<Arc<str>, GpuSpriteTexture>), String> {
    let mut textures = HashMap::new();
    let mut entities = Vec::new();

    let backdrop = load_texture_file(gpu, pipeline, BACKDROP_PATH)?;
    let sheet_tex = load_texture_file(gpu, pipeline, SHEET_PATH)?;
    let sheet_size = sheet_tex.texture.size;
    let font = text::load_font(Path::new(FONT_PATH))?;

    let backdrop_key: Arc<str> = Arc::from(BACKDROP_PATH);
    textures.insert(backdrop_key.clone(), backdrop);
    entities.push(Entity::Background {
        texture: backdrop_key,
    });

    let sheet_key: Arc<str> = Arc::from(SHEET_PATH);
    textures.insert(sheet_key.clone(), sheet_tex);
    for &state in GopherState::ALL {
        entities.push(Entity::Gopher {
            texture: sheet_key.clone(),
            sheet_size,
            clips: sheet::clips_for(state),
            state,
        });
    }

    for &state in GopherState::ALL {
        let raster = match text::render_line(&font, LABEL_SIZE_PX, state.caption()) {
            Ok(raster) => raster,
            Err(err) => {
                log::warn!("Label for {state} skipped: {err}");
                continue;
            }
        };
        let texture = Texture::from_rgba8(
            &gpu.device,
            &gpu.queue,
            &raster.pixels,
            raster.width,
            raster.height,
            state.caption(),
        );
        let bind_group = pipeline.create_texture_bind_group(&gpu.device, &texture);
        let key: Arc<str> = Arc::from(format!("label:{}", state.caption()));
        textures.insert(
            key.clone(),
            GpuSpriteTexture {
                texture,
                bind_group,
            },
        );
        entities.push(Entity::Label {
            texture: key,
            width: raster.width,
            height: raster.height,
            state,
        });
    }

    log::info!(
        "Entity store built: {} entities, {} textures",
        entities.len(),
        textures.len()
    );
    Ok((entities, textures))
}

fn load_texture_file(
    gpu: &GpuContext,
    pipeline: &SpritePipeline,
    path: &str,
) -> Result<GpuSpriteTexture, String> {
    let bytes =
        std::fs::read(path).map_err(|e| format!("Failed to read texture '{path}': {e}"))?;
    let texture = Texture::from_bytes(&gpu.device, &gpu.queue, &bytes, path)?;
    let bind_group = pipeline.create_texture_bind_group(&gpu.device, &texture);
    Ok(GpuSpriteTexture {
        texture,
        bind_group,
    })
}
