//! Painter trait abstraction.

use crate::hints::HintKind;
use image::RgbaImage;
use kurbo::Rect;
use peniko::Color;

/// Trait for rendering backends.
///
/// The view issues draw calls in a fixed order each frame: capture image,
/// selector, then hints. Coordinates are in view pixels.
pub trait Painter {
    /// Draw an image scaled into `dest`.
    fn draw_image(&mut self, image: &RgbaImage, dest: Rect);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the outline of a rectangle, centered on its edges.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);

    /// Draw a hint icon inside `bounds`.
    fn draw_hint(&mut self, kind: HintKind, bounds: Rect, color: Color);
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// A recorded draw call.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum DrawOp {
        Image { dest: Rect },
        Fill { rect: Rect, alpha: f32 },
        Stroke { rect: Rect, alpha: f32 },
        Hint { kind: HintKind, bounds: Rect, alpha: f32 },
    }

    /// Painter that records every call for assertions.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingPainter {
        pub(crate) ops: Vec<DrawOp>,
    }

    impl Painter for RecordingPainter {
        fn draw_image(&mut self, _image: &RgbaImage, dest: Rect) {
            self.ops.push(DrawOp::Image { dest });
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ops.push(DrawOp::Fill { rect, alpha: color.components[3] });
        }

        fn stroke_rect(&mut self, rect: Rect, color: Color, _width: f64) {
            self.ops.push(DrawOp::Stroke { rect, alpha: color.components[3] });
        }

        fn draw_hint(&mut self, kind: HintKind, bounds: Rect, color: Color) {
            self.ops.push(DrawOp::Hint { kind, bounds, alpha: color.components[3] });
        }
    }
}
