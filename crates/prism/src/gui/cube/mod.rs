pub mod model;
pub mod view;

pub use model::{FaceGeometry, TextureCache, visible_faces};
pub use view::draw;

pub const TEXTURE_SIZE: i32 = 1024;
pub const BORDER_WIDTH: f64 = 2.0;
pub const LABEL_SIZE: f64 = 22.0; // placeholder caption, at scale 1
pub const BADGE_RADIUS: f64 = 28.0; // video play badge
pub const MIN_FACING: f64 = 1e-3; // faces turned further away are culled
pub const MAX_SHADE: f64 = 0.75; // darkening of a face seen edge-on
