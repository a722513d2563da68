//! Radial "text cloud" layout
//!
//! The most frequent answer sits at the centre, sized by its count. Every
//! other answer is placed on a circle around it, starting directly above the
//! centre and proceeding clockwise (screen coordinates, y grows downward).
//! Near-vertical placements are rotated so long labels don't collide.

use log::trace;
use serde::Serialize;
use sheet_pulse_core::constants::{
    CAPTION_FONT_RATIO, FOCAL_FONT_BASE, FOCAL_FONT_MAX, FOCAL_FONT_STEP, RADIAL_RADIUS,
    SATELLITE_FONT_BASE, SATELLITE_FONT_MAX, SATELLITE_FONT_STEP, SATELLITE_OPACITY_FLOOR,
    SATELLITE_OPACITY_SPAN, VERTICAL_PLACEMENT_THRESHOLD, VERTICAL_ROTATION_DEGREES,
};
use sheet_pulse_types::AggregatedEntry;
use std::f64::consts::{FRAC_PI_2, TAU};

/// The top-ranked answer, drawn at the centre
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocalItem {
    pub label: String,
    pub count: usize,
    pub font_size: f64,
}

/// An answer placed on the ring around the focal item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SatelliteItem {
    pub label: String,
    pub count: usize,
    /// Angle in radians; -π/2 is straight up
    pub angle: f64,
    /// Offset from the centre, in layout units
    pub x: f64,
    pub y: f64,
    /// 0 or [`VERTICAL_ROTATION_DEGREES`]
    pub rotation_degrees: f64,
    pub font_size: f64,
    /// Size of the "×count" line under the label
    pub caption_font_size: f64,
    /// In `[0.7, 1.0]`
    pub opacity: f64,
}

/// Complete text cloud for one ranked column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialLayout {
    pub focal: FocalItem,
    pub satellites: Vec<SatelliteItem>,
    /// Sum of counts over every entry, focal included
    pub total_count: usize,
    pub radius: f64,
}

impl RadialLayout {
    pub fn is_single(&self) -> bool {
        self.satellites.is_empty()
    }
}

/// Lay out ranked entries as a text cloud.
///
/// `entries` must already be ranked (see `sheet_pulse_core::aggregate`).
/// Returns `None` for an empty list. The layout is a pure function of its
/// input and is rebuilt from scratch on every call.
pub fn layout_radial(entries: &[AggregatedEntry]) -> Option<RadialLayout> {
    let (top, rest) = entries.split_first()?;
    let total_count: usize = entries.iter().map(|e| e.count).sum();

    let focal = FocalItem {
        label: top.label.clone(),
        count: top.count,
        font_size: focal_font_size(top.count),
    };

    let n = rest.len();
    let satellites = rest
        .iter()
        .enumerate()
        .map(|(i, entry)| place_satellite(entry, i, n, total_count))
        .collect::<Vec<_>>();

    trace!(
        "Radial layout: focal '{}' ({}), {} satellites, total {}",
        focal.label,
        focal.count,
        satellites.len(),
        total_count
    );

    Some(RadialLayout {
        focal,
        satellites,
        total_count,
        radius: RADIAL_RADIUS,
    })
}

fn focal_font_size(count: usize) -> f64 {
    (FOCAL_FONT_BASE + count as f64 * FOCAL_FONT_STEP).min(FOCAL_FONT_MAX)
}

fn satellite_font_size(count: usize) -> f64 {
    (SATELLITE_FONT_BASE + count as f64 * SATELLITE_FONT_STEP).min(SATELLITE_FONT_MAX)
}

fn satellite_opacity(count: usize, total: usize) -> f64 {
    if total == 0 {
        return SATELLITE_OPACITY_FLOOR;
    }
    let share = count as f64 / total as f64;
    (SATELLITE_OPACITY_FLOOR + share * SATELLITE_OPACITY_SPAN)
        .clamp(SATELLITE_OPACITY_FLOOR, SATELLITE_OPACITY_FLOOR + SATELLITE_OPACITY_SPAN)
}

/// Only called with `n >= 1`
fn place_satellite(entry: &AggregatedEntry, i: usize, n: usize, total: usize) -> SatelliteItem {
    let angle = (i as f64 / n as f64) * TAU - FRAC_PI_2;
    let x = RADIAL_RADIUS * angle.cos();
    let y = RADIAL_RADIUS * angle.sin();

    let rotation_degrees = if x.abs() < VERTICAL_PLACEMENT_THRESHOLD {
        VERTICAL_ROTATION_DEGREES
    } else {
        0.0
    };

    let font_size = satellite_font_size(entry.count);

    SatelliteItem {
        label: entry.label.clone(),
        count: entry.count,
        angle,
        x,
        y,
        rotation_degrees,
        font_size,
        caption_font_size: font_size * CAPTION_FONT_RATIO,
        opacity: satellite_opacity(entry.count, total),
    }
}
