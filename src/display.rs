use crate::settings::DisplayConfiguration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eye {
    Left = 0,
    Right = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Tangent-space extents of an eye's projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionRaw {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistortionCoordinates {
    pub red: [f32; 2],
    pub green: [f32; 2],
    pub blue: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Display component for a windowed, non-physical HMD.
///
/// Both eyes share one window split down the middle, with a square
/// projection and no lens distortion.
#[derive(Debug, Clone)]
pub struct DisplayComponent {
    config: DisplayConfiguration,
}

impl DisplayComponent {
    pub fn new(config: DisplayConfiguration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DisplayConfiguration {
        &self.config
    }

    pub fn is_display_on_desktop(&self) -> bool {
        true
    }

    pub fn is_display_real_display(&self) -> bool {
        false
    }

    /// Returns (width, height)
    pub fn recommended_render_target_size(&self) -> (u32, u32) {
        (self.config.render_width, self.config.render_height)
    }

    pub fn eye_output_viewport(&self, eye: Eye) -> Viewport {
        let half_width = self.config.window_width / 2;

        Viewport {
            x: match eye {
                Eye::Left => 0,
                Eye::Right => half_width,
            },
            y: 0,
            width: half_width,
            height: self.config.window_height,
        }
    }

    pub fn projection_raw(&self, _eye: Eye) -> ProjectionRaw {
        ProjectionRaw {
            left: -1.0,
            right: 1.0,
            top: -1.0,
            bottom: 1.0,
        }
    }

    pub fn compute_distortion(&self, _eye: Eye, u: f32, v: f32) -> DistortionCoordinates {
        DistortionCoordinates {
            red: [u, v],
            green: [u, v],
            blue: [u, v],
        }
    }

    pub fn window_bounds(&self) -> WindowBounds {
        WindowBounds {
            x: self.config.window_x,
            y: self.config.window_y,
            width: self.config.window_width,
            height: self.config.window_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(window_width: u32, window_height: u32) -> DisplayComponent {
        DisplayComponent::new(DisplayConfiguration {
            window_x: 0,
            window_y: 0,
            window_width,
            window_height,
            render_width: 2016,
            render_height: 2240,
        })
    }

    #[test]
    fn test_viewport_split_even_width() {
        let d = display(1920, 1080);
        assert_eq!(
            d.eye_output_viewport(Eye::Left),
            Viewport {
                x: 0,
                y: 0,
                width: 960,
                height: 1080,
            }
        );
        assert_eq!(
            d.eye_output_viewport(Eye::Right),
            Viewport {
                x: 960,
                y: 0,
                width: 960,
                height: 1080,
            }
        );
    }

    #[test]
    fn test_viewport_split_odd_width_truncates() {
        let d = display(1921, 1081);
        assert_eq!(
            d.eye_output_viewport(Eye::Left),
            Viewport {
                x: 0,
                y: 0,
                width: 960,
                height: 1081,
            }
        );
        assert_eq!(
            d.eye_output_viewport(Eye::Right),
            Viewport {
                x: 960,
                y: 0,
                width: 960,
                height: 1081,
            }
        );
    }

    #[test]
    fn test_viewport_split_grid() {
        for w in [0u32, 1, 2, 3, 799, 800, 2559, 2560] {
            let d = display(w, 720);
            let left = d.eye_output_viewport(Eye::Left);
            let right = d.eye_output_viewport(Eye::Right);
            assert_eq!((left.x, left.width), (0, w / 2));
            assert_eq!((right.x, right.width), (w / 2, w / 2));
            assert_eq!((left.y, right.y), (0, 0));
        }
    }

    #[test]
    fn test_projection_is_unit_square() {
        let d = display(1920, 1080);
        for eye in [Eye::Left, Eye::Right] {
            let p = d.projection_raw(eye);
            assert_eq!((p.left, p.right, p.top, p.bottom), (-1.0, 1.0, -1.0, 1.0));
        }
    }

    #[test]
    fn test_distortion_is_identity() {
        let d = display(1920, 1080);
        let steps = 16;
        for i in 0..=steps {
            for j in 0..=steps {
                let (u, v) = (i as f32 / steps as f32, j as f32 / steps as f32);
                for eye in [Eye::Left, Eye::Right] {
                    let c = d.compute_distortion(eye, u, v);
                    assert_eq!(c.red, [u, v]);
                    assert_eq!(c.green, [u, v]);
                    assert_eq!(c.blue, [u, v]);
                }
            }
        }
    }

    #[test]
    fn test_flags_and_sizes() {
        let d = DisplayComponent::new(DisplayConfiguration {
            window_x: -1920,
            window_y: 40,
            window_width: 1920,
            window_height: 1080,
            render_width: 1512,
            render_height: 1680,
        });
        assert!(d.is_display_on_desktop());
        assert!(!d.is_display_real_display());
        assert_eq!(d.recommended_render_target_size(), (1512, 1680));
        assert_eq!(
            d.window_bounds(),
            WindowBounds {
                x: -1920,
                y: 40,
                width: 1920,
                height: 1080,
            }
        );
    }
}
