//! Clickzone Render Library
//!
//! Software rendering of condition selector frames. The painter is backed by
//! tiny-skia and produces plain RGBA images, so frames can be rendered
//! without a window or a GPU.

mod icons;
mod painter;

pub use painter::SkiaPainter;

use clickzone_core::ConditionSelectorView;
use image::RgbaImage;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render one frame of `view` on a surface of the given size.
///
/// The surface is cleared with `background` before the view draws. A hidden
/// view yields a frame with the background only.
pub fn render_frame(
    view: &ConditionSelectorView,
    width: u32,
    height: u32,
    background: Color,
) -> RenderResult<RgbaImage> {
    let mut painter = SkiaPainter::new(width, height)?;
    painter.clear(background);
    view.handle_draw(&mut painter);
    log::debug!("Rendered {}x{} frame", width, height);
    Ok(painter.into_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickzone_core::{ScreenMetrics, SelectorConfig};
    use image::Rgba;
    use std::time::{Duration, Instant};

    fn view_with_capture() -> ConditionSelectorView {
        let mut view = ConditionSelectorView::new(&SelectorConfig::default(), ScreenMetrics::default());
        view.handle_resize(200.0, 200.0);
        view.set_hidden(false);
        view.show_capture(RgbaImage::from_pixel(200, 200, Rgba([0, 0, 255, 255])));
        let start = Instant::now();
        view.update(start);
        view.update(start + Duration::from_secs(5));
        view
    }

    #[test]
    fn test_zero_size_rejected() {
        let view = ConditionSelectorView::new(&SelectorConfig::default(), ScreenMetrics::default());
        assert_eq!(
            render_frame(&view, 0, 10, Color::BLACK).unwrap_err(),
            RenderError::InvalidSize { width: 0, height: 10 }
        );
    }

    #[test]
    fn test_hidden_view_renders_background() {
        let view = ConditionSelectorView::new(&SelectorConfig::default(), ScreenMetrics::default());
        let frame = render_frame(&view, 8, 8, Color::from_rgba8(10, 20, 30, 255)).unwrap();
        assert!(frame.pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn test_frame_shows_capture_and_selector() {
        let view = view_with_capture();
        let frame = render_frame(&view, 200, 200, Color::BLACK).unwrap();

        // Outside the selector: the capture as is.
        assert_eq!(*frame.get_pixel(5, 5), Rgba([0, 0, 255, 255]));

        // Inside the selector: the capture darkened by the selector background.
        let selector = view.selector().area();
        let inside = frame.get_pixel(selector.center().x as u32, selector.center().y as u32 + 30);
        assert!(inside[2] < 255);
        assert!(inside[2] > 100);
    }
}
