//! Fixed design constants
//!
//! These values define observable behaviour (which columns chart, how the
//! text cloud is sized). They have no configuration surface.

use std::time::Duration;

/// Largest number of distinct answers a column may have and still chart
pub const CATEGORICAL_MAX_DISTINCT: usize = 10;

/// Distance of satellite answers from the centre of the text cloud, in layout units
pub const RADIAL_RADIUS: f64 = 250.0;

/// Satellites with `|x|` below this are near-vertical and get rotated
pub const VERTICAL_PLACEMENT_THRESHOLD: f64 = 100.0;

/// Rotation applied to near-vertical satellites, in degrees
pub const VERTICAL_ROTATION_DEGREES: f64 = -90.0;

/// Focal font size: base + per-answer step, capped
pub const FOCAL_FONT_BASE: f64 = 60.0;
pub const FOCAL_FONT_STEP: f64 = 10.0;
pub const FOCAL_FONT_MAX: f64 = 120.0;

/// Satellite font size: base + per-answer step, capped
pub const SATELLITE_FONT_BASE: f64 = 30.0;
pub const SATELLITE_FONT_STEP: f64 = 5.0;
pub const SATELLITE_FONT_MAX: f64 = 50.0;

/// Satellite opacity is the floor plus its share of all answers times the span
pub const SATELLITE_OPACITY_FLOOR: f64 = 0.7;
pub const SATELLITE_OPACITY_SPAN: f64 = 0.3;

/// The "×count" caption under a satellite, relative to its font size
pub const CAPTION_FONT_RATIO: f64 = 0.4;

/// Upper bound on a single fetch before it is reported as a transport error
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
