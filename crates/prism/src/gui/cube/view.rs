use super::model::{CubeShape, FaceGeometry, TextureCache, visible_faces};
use super::{BADGE_RADIUS, BORDER_WIDTH, LABEL_SIZE, MAX_SHADE};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;
use turnstile::item::{CarouselItem, MediaKind};
use turnstile::{Carousel, Point};

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct FaceRenderer<'a> {
    geometry: &'a FaceGeometry,
    item: Option<&'a CarouselItem>,
    texture: Option<Pixbuf>,
    /// Projected height relative to the unturned face.
    scale: f64,
}

impl<'a> FaceRenderer<'a> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.trace(cr);
        set_color(cr, colors.face);
        cr.fill()?;

        cr.save()?;
        self.trace(cr);
        cr.clip();
        self.draw_content(cr, colors)?;
        self.draw_shade(cr, colors)?;
        cr.restore()?;

        self.trace(cr);
        set_color(cr, colors.border);
        cr.set_line_width(BORDER_WIDTH);
        cr.stroke()
    }

    fn trace(&self, cr: &Context) {
        let [first, rest @ ..] = &self.geometry.corners;
        cr.new_path();
        cr.move_to(first.x, first.y);
        for p in rest {
            cr.line_to(p.x, p.y);
        }
        cr.close_path();
    }

    fn draw_content(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let Some(item) = self.item else {
            return Ok(());
        };
        match &self.texture {
            Some(pixbuf) => self.draw_texture(cr, pixbuf)?,
            None => self.draw_label(cr, item.description(), colors)?,
        }
        if item.kind == MediaKind::Video {
            self.draw_badge(cr, colors)?;
        }
        Ok(())
    }

    fn draw_texture(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        // stretch over the quad's bounding box; the clip trims it to the face
        let (x, y, w, h) = self.geometry.bounds();
        if w <= 0.0 || h <= 0.0 {
            return Ok(());
        }
        cr.save()?;
        cr.translate(x, y);
        cr.scale(w / pixbuf.width() as f64, h / pixbuf.height() as f64);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_label(&self, cr: &Context, text: &str, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let center = self.center();
        set_color(cr, colors.label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_SIZE * self.scale);
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(center.x - ext.width() / 2.0, center.y + ext.height() / 2.0);
            cr.show_text(text)?;
        }
        Ok(())
    }

    fn draw_badge(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (x, y, w, h) = self.geometry.bounds();
        let r = BADGE_RADIUS * self.scale;
        let (cx, cy) = (x + w - r * 1.5, y + h - r * 1.5);

        set_color(cr, colors.badge);
        cr.new_path();
        cr.arc(cx, cy, r, 0.0, 2.0 * PI);
        cr.fill()?;

        set_color(cr, colors.label);
        cr.move_to(cx - r * 0.35, cy - r * 0.5);
        cr.line_to(cx + r * 0.55, cy);
        cr.line_to(cx - r * 0.35, cy + r * 0.5);
        cr.close_path();
        cr.fill()
    }

    fn draw_shade(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let alpha = MAX_SHADE * (1.0 - self.geometry.facing.clamp(0.0, 1.0));
        if alpha <= 0.0 {
            return Ok(());
        }
        set_color(cr, colors.shade);
        cr.paint_with_alpha(alpha)
    }

    fn center(&self) -> Point {
        let (x, y, w, h) = self.geometry.bounds();
        Point::new(x + w / 2.0, y + h / 2.0)
    }
}

pub fn draw(
    cr: &Context,
    carousel: &Carousel,
    textures: &mut TextureCache,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let shape = CubeShape::new(carousel.config(), Point::new(width / 2.0, height / 2.0));

    if carousel.is_empty() {
        return draw_empty(cr, &shape, colors);
    }

    let bindings = carousel.face_bindings();
    for geometry in visible_faces(carousel.rotation_angle(), &shape) {
        let item = bindings[geometry.face].and_then(|index| carousel.item(index));
        let texture = item.and_then(|item| textures.get(item)).cloned();
        let scale = geometry.bounds().3 / shape.height;

        FaceRenderer {
            geometry: &geometry,
            item,
            texture,
            scale,
        }
        .draw(cr, colors)?;
    }
    Ok(())
}

fn draw_empty(cr: &Context, shape: &CubeShape, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let front = FaceGeometry::project(0, 0.0, shape);
    let renderer = FaceRenderer {
        geometry: &front,
        item: None,
        texture: None,
        scale: 1.0,
    };

    renderer.trace(cr);
    set_color(cr, colors.border);
    cr.set_line_width(BORDER_WIDTH);
    cr.set_dash(&[8.0, 6.0], 0.0);
    cr.stroke()?;
    cr.set_dash(&[], 0.0);
    renderer.draw_label(cr, "No items", colors)
}
