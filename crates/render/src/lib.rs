//! sheet-pulse-render: Layout computation for charts and the text cloud.
//!
//! Nothing here draws; it produces the positioned, sized data that a chart
//! library or text renderer consumes.

pub mod chart_data;
pub mod radial_layout;

pub use chart_data::ChartSeries;
pub use radial_layout::{layout_radial, FocalItem, RadialLayout, SatelliteItem};
