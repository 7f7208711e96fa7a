//! tiny-skia implementation of the core painter.

use crate::icons;
use crate::{RenderError, RenderResult};
use clickzone_core::{HintKind, Painter};
use image::RgbaImage;
use kurbo::Rect;
use peniko::Color;
use tiny_skia::{
    ColorU8, FilterQuality, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint,
    Stroke, Transform,
};

/// Software painter drawing into an in-memory pixmap.
pub struct SkiaPainter {
    pixmap: Pixmap,
}

impl SkiaPainter {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill the whole surface with `color`.
    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a));
    }

    /// Consume the painter and return its pixels, with straight alpha.
    pub fn into_image(self) -> RgbaImage {
        let pixmap = self.pixmap;
        RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
            let color = pixmap
                .pixel(x, y)
                .map(|pixel| pixel.demultiply())
                .unwrap_or_else(|| ColorU8::from_rgba(0, 0, 0, 0));
            image::Rgba([color.red(), color.green(), color.blue(), color.alpha()])
        })
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let rgba = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
    paint.anti_alias = true;
    paint
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_ltrb(rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32)
}

/// Copy an image into a pixmap, premultiplying its alpha.
fn image_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())?;
    let mut data = Vec::with_capacity(image.as_raw().len());
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let premultiplied = ColorU8::from_rgba(r, g, b, a).premultiply();
        data.extend_from_slice(&[
            premultiplied.red(),
            premultiplied.green(),
            premultiplied.blue(),
            premultiplied.alpha(),
        ]);
    }
    Pixmap::from_vec(data, size)
}

impl Painter for SkiaPainter {
    fn draw_image(&mut self, image: &RgbaImage, dest: Rect) {
        if dest.is_zero_area() {
            return;
        }
        let Some(source) = image_to_pixmap(image) else {
            log::warn!("Skipping image of invalid size {}x{}", image.width(), image.height());
            return;
        };

        let transform = Transform::from_row(
            (dest.width() / image.width() as f64) as f32,
            0.0,
            0.0,
            (dest.height() / image.height() as f64) as f32,
            dest.x0 as f32,
            dest.y0 as f32,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..Default::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if let Some(rect) = to_skia_rect(rect) {
            self.pixmap
                .fill_rect(rect, &paint_for(color), Transform::identity(), None);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        let Some(rect) = to_skia_rect(rect) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let stroke = Stroke {
            width: width as f32,
            line_join: LineJoin::Miter,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint_for(color), &stroke, Transform::identity(), None);
    }

    fn draw_hint(&mut self, kind: HintKind, bounds: Rect, color: Color) {
        let Some(icon) = icons::hint_icon(kind, bounds) else {
            return;
        };
        let paint = paint_for(color);
        let stroke = Stroke {
            width: icons::shaft_width(bounds),
            line_cap: LineCap::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&icon.shafts, &paint, &stroke, Transform::identity(), None);
        self.pixmap.fill_path(
            &icon.heads,
            &paint,
            tiny_skia::FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}
