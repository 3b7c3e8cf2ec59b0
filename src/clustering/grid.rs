// Grid bucketing by raw degree flooring.
//
// Latitude and longitude are floored independently, so a 0.01° cell is
// roughly 1.1 km square at the equator but narrows east-west toward the
// poles. This is an approximation, not a geodesic partition.

use serde::{Deserialize, Serialize};

/// Integer cell indices `(floor(lat / size), floor(lng / size))`.
///
/// Ordered by (x, y) so cluster output can be emitted in a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i64,
    pub y: i64,
}

impl GridCell {
    /// The cell containing a point. Coordinates are not validated: the
    /// float-to-int cast saturates, so NaN maps to index 0 and ±infinity to
    /// `i64::MAX` / `i64::MIN`.
    pub fn containing(latitude: f64, longitude: f64, cell_size_deg: f64) -> Self {
        Self {
            x: (latitude / cell_size_deg).floor() as i64,
            y: (longitude / cell_size_deg).floor() as i64,
        }
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
