//! Draw-list construction for the render step. Pure with respect to GPU
//! state, so the per-frame draw decisions (visibility, clip choice, tint,
//! fade) are testable without a device.

use std::sync::Arc;

use gb_core::session::Session;
use gb_core::sheet::{Rect, SIZE};
use gb_render::SpriteVertex;

use crate::entities::Entity;

/// One blit: a texture region to a destination rectangle with a modulation
/// color. Tint lives in the RGB channels, label fade in A.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCmd {
    pub texture: Arc<str>,
    /// Normalized source region: u0, v0, u1, v1.
    pub uv: [f32; 4],
    /// Destination in pixels: x, y, w, h.
    pub dst: [f32; 4],
    pub color: [f32; 4],
}

/// A contiguous index run sharing one texture binding.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    pub texture: Arc<str>,
    pub index_start: u32,
    pub index_count: u32,
}

/// Walk the entity store in order and emit one command per visible entity:
/// the backdrop always, and exactly the one gopher and one label whose
/// state tag matches the session's current state.
pub fn build_draw_list(
    entities: &[Entity],
    session: &Session,
    viewport: (u32, u32),
) -> Vec<DrawCmd> {
    let (vw, vh) = (viewport.0 as f32, viewport.1 as f32);
    let (cx, cy) = (vw / 2.0, vh / 2.0);
    let size = SIZE as f32;
    let tint = session.state.tint();
    let display_frame = session.frame.display_frame();
    let alpha = session.frame.alpha();

    let mut cmds = Vec::with_capacity(3);
    for entity in entities {
        match entity {
            Entity::Background { texture } => cmds.push(DrawCmd {
                texture: texture.clone(),
                uv: [0.0, 0.0, 1.0, 1.0],
                dst: [0.0, 0.0, vw, vh],
                color: [1.0, 1.0, 1.0, 1.0],
            }),
            Entity::Gopher {
                texture,
                sheet_size,
                clips,
                state,
            } if *state == session.state => {
                cmds.push(DrawCmd {
                    texture: texture.clone(),
                    uv: clip_uv(clips[display_frame], *sheet_size),
                    dst: [cx - size / 2.0, cy - size / 2.0, size, size],
                    color: [
                        tint[0] as f32 / 255.0,
                        tint[1] as f32 / 255.0,
                        tint[2] as f32 / 255.0,
                        tint[3] as f32 / 255.0,
                    ],
                });
            }
            Entity::Label {
                texture,
                width,
                height,
                state,
            } if *state == session.state => {
                let (w, h) = (*width as f32, *height as f32);
                cmds.push(DrawCmd {
                    texture: texture.clone(),
                    uv: [0.0, 0.0, 1.0, 1.0],
                    dst: [cx - w / 2.0, cy - size * 1.5, w, h],
                    color: [1.0, 1.0, 1.0, alpha as f32 / 255.0],
                });
            }
            _ => {}
        }
    }
    cmds
}

/// Expand draw commands into a quad mesh. Consecutive commands sharing a
/// texture collapse into one batch, so bind switches stay minimal.
pub fn build_mesh(
    cmds: &[DrawCmd],
    vertices: &mut Vec<SpriteVertex>,
    indices: &mut Vec<u32>,
) -> Vec<DrawBatch> {
    let mut batches: Vec<DrawBatch> = Vec::new();
    for cmd in cmds {
        let [x, y, w, h] = cmd.dst;
        let [u0, v0, u1, v1] = cmd.uv;
        let base = vertices.len() as u32;
        vertices.push(SpriteVertex {
            position: [x, y],
            tex_coords: [u0, v0],
            color: cmd.color,
        });
        vertices.push(SpriteVertex {
            position: [x + w, y],
            tex_coords: [u1, v0],
            color: cmd.color,
        });
        vertices.push(SpriteVertex {
            position: [x + w, y + h],
            tex_coords: [u1, v1],
            color: cmd.color,
        });
        vertices.push(SpriteVertex {
            position: [x, y + h],
            tex_coords: [u0, v1],
            color: cmd.color,
        });

        let start = indices.len() as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);

        match batches.last_mut() {
            Some(last)
                if last.texture == cmd.texture
                    && last.index_start + last.index_count == start =>
            {
                last.index_count += 6;
            }
            _ => batches.push(DrawBatch {
                texture: cmd.texture.clone(),
                index_start: start,
                index_count: 6,
            }),
        }
    }
    batches
}

fn clip_uv(clip: Rect, sheet: (u32, u32)) -> [f32; 4] {
    let (sw, sh) = (sheet.0 as f32, sheet.1 as f32);
    [
        clip.x as f32 / sw,
        clip.y as f32 / sh,
        (clip.x + clip.w) as f32 / sw,
        (clip.y + clip.h) as f32 / sh,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gb_core::event::{Event, MouseButton};
    use gb_core::session::ClickSound;
    use gb_core::sheet::{self, SIZE};
    use gb_core::state::GopherState;

    const VIEWPORT: (u32, u32) = (640, 480);
    const SHEET_PX: (u32, u32) = (SIZE * 6, SIZE);

    struct NullClick;

    impl ClickSound for NullClick {
        fn play_click(&mut self) {}
    }

    fn store() -> Vec<Entity> {
        let backdrop: Arc<str> = Arc::from("backdrop");
        let sheet_key: Arc<str> = Arc::from("sheet");
        let mut entities = vec![Entity::Background { texture: backdrop }];
        for &state in GopherState::ALL {
            entities.push(Entity::Gopher {
                texture: sheet_key.clone(),
                sheet_size: SHEET_PX,
                clips: sheet::clips_for(state),
                state,
            });
        }
        for &state in GopherState::ALL {
            entities.push(Entity::Label {
                texture: Arc::from(format!("label:{}", state.caption())),
                width: 80,
                height: 40,
                state,
            });
        }
        entities
    }

    #[test]
    fn fresh_start_draws_backdrop_run_gopher_and_run_label() {
        let entities = store();
        let session = Session::new();
        let cmds = build_draw_list(&entities, &session, VIEWPORT);
        assert_eq!(cmds.len(), 3);

        // Backdrop covers the whole window, unmodulated.
        assert_eq!(&*cmds[0].texture, "backdrop");
        assert_eq!(cmds[0].dst, [0.0, 0.0, 640.0, 480.0]);
        assert_eq!(cmds[0].uv, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(cmds[0].color, [1.0, 1.0, 1.0, 1.0]);

        // RUN gopher with RUN tint using clip index 0 (first sixth of the
        // strip), centered at SIZE x SIZE.
        assert_eq!(&*cmds[1].texture, "sheet");
        assert_eq!(cmds[1].uv, [0.0, 0.0, 1.0 / 6.0, 1.0]);
        assert_eq!(cmds[1].dst, [320.0 - 64.0, 240.0 - 64.0, 128.0, 128.0]);
        let tint = GopherState::Run.tint();
        assert_eq!(cmds[1].color[0], tint[0] as f32 / 255.0);
        assert_eq!(cmds[1].color[3], 1.0);

        // RUN label at full opacity, centered horizontally, 1.5 x SIZE
        // above center.
        assert_eq!(&*cmds[2].texture, "label:RUN");
        assert_eq!(cmds[2].dst, [320.0 - 40.0, 240.0 - 192.0, 80.0, 40.0]);
        assert_eq!(cmds[2].color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn exactly_one_gopher_and_one_label_per_state() {
        let entities = store();
        let mut session = Session::new();
        for _ in 0..3 {
            let cmds = build_draw_list(&entities, &session, VIEWPORT);
            let caption = session.state.caption();
            assert_eq!(cmds.len(), 3);
            assert_eq!(&*cmds[2].texture, format!("label:{caption}"));
            session.handle_event(&Event::MouseButtonDown(MouseButton::Left), &mut NullClick);
        }
    }

    #[test]
    fn click_switches_to_the_flap_clip_pair() {
        let entities = store();
        let mut session = Session::new();
        session.handle_event(&Event::MouseButtonDown(MouseButton::Left), &mut NullClick);
        let cmds = build_draw_list(&entities, &session, VIEWPORT);
        // FLAP uses cells [2:4]; display frame 0 selects the third cell.
        assert_eq!(cmds[1].uv, [2.0 / 6.0, 0.0, 3.0 / 6.0, 1.0]);
        let tint = GopherState::Flap.tint();
        assert_eq!(cmds[1].color[0], tint[0] as f32 / 255.0);
    }

    #[test]
    fn advancing_flips_the_displayed_clip() {
        let entities = store();
        let mut session = Session::new();
        session.advance();
        session.advance();
        assert_eq!(session.frame.display_frame(), 1);
        let cmds = build_draw_list(&entities, &session, VIEWPORT);
        assert_eq!(cmds[1].uv, [1.0 / 6.0, 0.0, 2.0 / 6.0, 1.0]);
    }

    #[test]
    fn label_alpha_tracks_the_fade() {
        let entities = store();
        let mut session = Session::new();
        session.advance();
        let cmds = build_draw_list(&entities, &session, VIEWPORT);
        assert_eq!(cmds[2].color[3], 245.0 / 255.0);
        // The gopher tint alpha stays opaque regardless of the fade.
        assert_eq!(cmds[1].color[3], 1.0);
    }

    #[test]
    fn missing_label_degrades_to_two_draws() {
        let entities: Vec<Entity> = store()
            .into_iter()
            .filter(|e| !matches!(e, Entity::Label { state, .. } if *state == GopherState::Run))
            .collect();
        let session = Session::new();
        let cmds = build_draw_list(&entities, &session, VIEWPORT);
        assert_eq!(cmds.len(), 2);
    }

    #[test]
    fn mesh_emits_four_vertices_per_command() {
        let entities = store();
        let session = Session::new();
        let cmds = build_draw_list(&entities, &session, VIEWPORT);
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let batches = build_mesh(&cmds, &mut vertices, &mut indices);
        assert_eq!(vertices.len(), cmds.len() * 4);
        assert_eq!(indices.len(), cmds.len() * 6);
        assert_eq!(batches.len(), 3);
    }

    #[test]
    fn mesh_batches_merge_consecutive_same_texture_commands() {
        let shared: Arc<str> = Arc::from("shared");
        let cmds = vec![
            DrawCmd {
                texture: shared.clone(),
                uv: [0.0, 0.0, 1.0, 1.0],
                dst: [0.0, 0.0, 10.0, 10.0],
                color: [1.0; 4],
            },
            DrawCmd {
                texture: shared.clone(),
                uv: [0.0, 0.0, 1.0, 1.0],
                dst: [10.0, 0.0, 10.0, 10.0],
                color: [1.0; 4],
            },
        ];
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let batches = build_mesh(&cmds, &mut vertices, &mut indices);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].index_count, 12);
    }
}
