use super::{MIN_FACING, TEXTURE_SIZE};
use gdk_pixbuf::Pixbuf;
use std::collections::HashMap;
use turnstile::config::{Axis, RotationDirection};
use turnstile::drag::QUARTER_TURN;
use turnstile::faces::FACE_COUNT;
use turnstile::item::{CarouselItem, MediaSource};
use turnstile::{CarouselConfig, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeShape {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub perspective: f64,
    pub direction: RotationDirection,
}

impl CubeShape {
    pub fn new(config: &CarouselConfig, center: Point) -> Self {
        Self {
            center,
            width: config.width,
            height: config.height,
            perspective: config.perspective,
            direction: config.direction,
        }
    }

    /// Half the cube depth along the turning plane.
    fn radius(&self) -> f64 {
        match self.direction.axis() {
            Axis::Horizontal => self.width / 2.0,
            Axis::Vertical => self.height / 2.0,
        }
    }

    /// Perspective scale for a point at `depth`; 1 on the front plane.
    fn scale(&self, depth: f64) -> f64 {
        self.perspective / (self.perspective + self.radius() - depth)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaceGeometry {
    pub face: usize,
    /// Top-left, top-right, bottom-right, bottom-left as seen when the face is in front.
    pub corners: [Point; 4],
    pub depth: f64,
    /// Cosine between the face normal and the view direction.
    pub facing: f64,
}

impl FaceGeometry {
    pub fn project(face: usize, angle: f64, shape: &CubeShape) -> Self {
        let alpha = (face as f64 * QUARTER_TURN - angle).to_radians();
        let (sin, cos) = alpha.sin_cos();
        let sign = shape.direction.sign();
        let r = shape.radius();

        // face centre and edge tangent as (lateral, depth); lateral runs along the turning axis
        let (lateral, depth) = (sign * r * sin, r * cos);
        let (t_lateral, t_depth) = (cos, -sign * sin);
        let near = (lateral - r * t_lateral, depth - r * t_depth);
        let far = (lateral + r * t_lateral, depth + r * t_depth);
        let (sa, sb) = (shape.scale(near.1), shape.scale(far.1));
        let c = shape.center;

        let corners = match shape.direction.axis() {
            Axis::Horizontal => {
                let hh = shape.height / 2.0;
                [
                    Point::new(c.x + near.0 * sa, c.y - hh * sa),
                    Point::new(c.x + far.0 * sb, c.y - hh * sb),
                    Point::new(c.x + far.0 * sb, c.y + hh * sb),
                    Point::new(c.x + near.0 * sa, c.y + hh * sa),
                ]
            }
            Axis::Vertical => {
                let hw = shape.width / 2.0;
                [
                    Point::new(c.x - hw * sa, c.y + near.0 * sa),
                    Point::new(c.x + hw * sa, c.y + near.0 * sa),
                    Point::new(c.x + hw * sb, c.y + far.0 * sb),
                    Point::new(c.x - hw * sb, c.y + far.0 * sb),
                ]
            }
        };

        Self {
            face,
            corners,
            depth,
            facing: cos,
        }
    }

    /// (x, y, width, height) of the projected quad.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.corners {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        (min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// Faces turned towards the viewer, farthest first.
pub fn visible_faces(angle: f64, shape: &CubeShape) -> Vec<FaceGeometry> {
    let mut faces: Vec<_> = (0..FACE_COUNT)
        .map(|face| FaceGeometry::project(face, angle, shape))
        .filter(|geometry| geometry.facing > MIN_FACING)
        .collect();
    faces.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    faces
}

/// Decoded stills keyed by their source; a failed load is remembered as `None`.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<MediaSource, Option<Pixbuf>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, item: &CarouselItem) -> Option<&Pixbuf> {
        let source = item.still()?;
        self.textures
            .entry(source.clone())
            .or_insert_with(|| Self::load(source))
            .as_ref()
    }

    fn load(source: &MediaSource) -> Option<Pixbuf> {
        if source.contains("://") {
            log::debug!("Remote media '{}' is not fetched", source);
            return None;
        }
        Pixbuf::from_file_at_scale(source.as_str(), TEXTURE_SIZE, TEXTURE_SIZE, true)
            .map_err(|e| log::warn!("Failed to load '{}': {}", source, e))
            .ok()
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn shape(direction: RotationDirection) -> CubeShape {
        let config = CarouselConfig {
            direction,
            width: 400.0,
            height: 200.0,
            perspective: 1000.0,
            ..CarouselConfig::default()
        };
        CubeShape::new(&config, Point::new(500.0, 300.0))
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn test_front_face_at_rest_is_flat() {
        let faces = visible_faces(0.0, &shape(RotationDirection::Left));
        assert_eq!(faces.len(), 1);

        let front = &faces[0];
        assert_eq!(front.face, 0);
        assert!(close(front.corners[0], Point::new(300.0, 200.0)));
        assert!(close(front.corners[2], Point::new(700.0, 400.0)));
        assert_eq!(front.bounds(), (300.0, 200.0, 400.0, 200.0));
    }

    #[test]
    fn test_rest_angle_brings_face_forward() {
        let faces = visible_faces(270.0, &shape(RotationDirection::Top));
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].face, 3);
        assert!(close(faces[0].corners[0], Point::new(300.0, 200.0)));
    }

    #[test]
    fn test_mid_turn_shows_next_face_on_the_right() {
        let faces = visible_faces(45.0, &shape(RotationDirection::Left));
        let ids: Vec<_> = faces.iter().map(|f| f.face).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&0) && ids.contains(&1));

        let current = faces.iter().find(|f| f.face == 0).unwrap();
        let next = faces.iter().find(|f| f.face == 1).unwrap();
        assert!(current.bounds().0 < next.bounds().0);
        assert!((current.facing - next.facing).abs() < EPS);
    }

    #[test]
    fn test_right_direction_mirrors_travel() {
        let faces = visible_faces(45.0, &shape(RotationDirection::Right));
        let current = faces.iter().find(|f| f.face == 0).unwrap();
        let next = faces.iter().find(|f| f.face == 1).unwrap();
        assert!(next.bounds().0 < current.bounds().0);
        // not mirrored: left edge stays left
        assert!(current.corners[0].x < current.corners[1].x);
    }

    #[test]
    fn test_vertical_next_face_below() {
        let faces = visible_faces(30.0, &shape(RotationDirection::Top));
        let current = faces.iter().find(|f| f.face == 0).unwrap();
        let next = faces.iter().find(|f| f.face == 1).unwrap();
        assert!(current.bounds().1 < next.bounds().1);
        // the face nearer the front is drawn last
        assert_eq!(faces.last().map(|f| f.face), Some(0));
    }

    #[test]
    fn test_receding_edge_is_smaller() {
        let faces = visible_faces(30.0, &shape(RotationDirection::Left));
        let current = faces.iter().find(|f| f.face == 0).unwrap();
        let left_height = current.corners[3].y - current.corners[0].y;
        let right_height = current.corners[2].y - current.corners[1].y;
        assert!(left_height < right_height);
    }

    #[test]
    fn test_textures_are_keyed_by_source() {
        let mut cache = TextureCache::new();
        let first = CarouselItem::image("promo", "https://cdn.example.org/a.png");
        let second = CarouselItem::image("promo", "https://cdn.example.org/b.png");
        let posterless = CarouselItem::video("clip", "https://cdn.example.org/clip.webm");

        assert!(cache.get(&first).is_none());
        assert!(cache.get(&second).is_none());
        assert!(cache.get(&posterless).is_none());
        assert_eq!(cache.textures.len(), 2);
        assert!(
            cache
                .textures
                .contains_key(&MediaSource::new("https://cdn.example.org/b.png"))
        );

        cache.clear();
        assert!(cache.textures.is_empty());
    }
}
