use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScreenUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Pixel-space projection: origin at the top-left corner, y growing
/// downward, so destination rectangles use blit coordinates directly.
pub struct ScreenProjection {
    pub viewport: (u32, u32),
}

impl ScreenProjection {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn build_uniform(&self) -> ScreenUniform {
        let proj = Mat4::orthographic_rh(
            0.0,
            self.viewport.0 as f32,
            self.viewport.1 as f32,
            0.0,
            -1.0,
            1.0,
        );

        ScreenUniform {
            view_proj: proj.to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn corners_map_to_clip_space() {
        let screen = ScreenProjection::new(640, 480);
        let proj = Mat4::from_cols_array_2d(&screen.build_uniform().view_proj);

        let top_left = proj * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((top_left.x - -1.0).abs() < 1e-6);
        assert!((top_left.y - 1.0).abs() < 1e-6);

        let bottom_right = proj * Vec4::new(640.0, 480.0, 0.0, 1.0);
        assert!((bottom_right.x - 1.0).abs() < 1e-6);
        assert!((bottom_right.y - -1.0).abs() < 1e-6);
    }

    #[test]
    fn center_maps_to_origin() {
        let screen = ScreenProjection::new(640, 480);
        let proj = Mat4::from_cols_array_2d(&screen.build_uniform().view_proj);
        let center = proj * Vec4::new(320.0, 240.0, 0.0, 1.0);
        assert!(center.x.abs() < 1e-6);
        assert!(center.y.abs() < 1e-6);
    }
}
