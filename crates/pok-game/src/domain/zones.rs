//! Zone resolution.
//!
//! Maps a position on the table (percent of width and height) to the zone it
//! scores in. The table has rectangular bands along the x-axis and two
//! circular zones that take precedence over the bands. Positions close to a
//! zone edge score the adjacent lower-scoring zone instead.

use serde::Serialize;

/// Zone id returned for positions off the table.
pub const OUTER_ZONE_ID: &str = "outer";

/// A rectangular band spanning the full table height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Zone id.
    pub id: &'static str,
    /// Points scored inside the band.
    pub points: u32,
    /// Exclusive upper x edge in percent. The last band also includes it.
    pub max_x: f64,
}

/// A circular zone. The vertical offset is divided by the layout's aspect
/// correction before measuring distance, so the circle is round on the
/// physical table even though both axes are in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Zone id.
    pub id: &'static str,
    /// Points scored inside the circle.
    pub points: u32,
    /// Center x in percent.
    pub center_x: f64,
    /// Center y in percent.
    pub center_y: f64,
    /// Radius in percent of table width.
    pub radius: f64,
}

/// Table geometry and scoring table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneLayout {
    /// Bands ordered from x = 0 inward; each band scores more than the next.
    pub bands: &'static [Band],
    /// The circle nearer y = 0 when the table is not flipped.
    pub top_circle: Circle,
    /// The circle nearer y = 100 when the table is not flipped.
    pub bottom_circle: Circle,
    /// Divisor applied to vertical offsets inside circles.
    pub aspect_correction: f64,
    /// Distance from an edge, in percent, inside which a position scores
    /// the adjacent lower zone.
    pub boundary_threshold: f64,
}

const STANDARD_BANDS: &[Band] = &[
    Band {
        id: "3",
        points: 3,
        max_x: 20.0,
    },
    Band {
        id: "2",
        points: 2,
        max_x: 40.0,
    },
    Band {
        id: "1",
        points: 1,
        max_x: 60.0,
    },
    Band {
        id: "0",
        points: 0,
        max_x: 100.0,
    },
];

impl ZoneLayout {
    /// The regulation table.
    pub const STANDARD: ZoneLayout = ZoneLayout {
        bands: STANDARD_BANDS,
        top_circle: Circle {
            id: "4",
            points: 4,
            center_x: 50.0,
            center_y: 19.0,
            radius: 6.0,
        },
        bottom_circle: Circle {
            id: "5",
            points: 5,
            center_x: 50.0,
            center_y: 81.0,
            radius: 6.0,
        },
        aspect_correction: 1.5,
        boundary_threshold: 2.0,
    };

    fn band_index(&self, x: f64) -> Option<usize> {
        self.bands
            .iter()
            .position(|band| x < band.max_x)
            .or_else(|| self.bands.len().checked_sub(1))
    }

    fn distance_from(&self, circle: &Circle, x: f64, y: f64) -> f64 {
        let dx = x - circle.center_x;
        let dy = (y - circle.center_y) / self.aspect_correction;
        dx.hypot(dy)
    }
}

impl Default for ZoneLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Where a pok scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneResolution {
    /// The zone the position lies in.
    pub zone_id: &'static str,
    /// Points awarded.
    pub points: u32,
    /// `false` when the position sits on an edge and scores the lower zone.
    pub is_high: bool,
    /// The lower zone whose value was awarded, for edge positions.
    pub boundary_zone: Option<&'static str>,
}

impl ZoneResolution {
    const fn outer() -> Self {
        Self {
            zone_id: OUTER_ZONE_ID,
            points: 0,
            is_high: true,
            boundary_zone: None,
        }
    }
}

/// Resolves a position against the regulation table.
#[must_use]
pub fn resolve_zone(x: f64, y: f64, is_flipped: bool) -> ZoneResolution {
    resolve_zone_with(&ZoneLayout::STANDARD, x, y, is_flipped)
}

/// Resolves a position against `layout`.
///
/// Flipping swaps which circle scores which value; it never moves the
/// circles or the bands.
#[must_use]
pub fn resolve_zone_with(layout: &ZoneLayout, x: f64, y: f64, is_flipped: bool) -> ZoneResolution {
    let on_table = (0.0..=100.0).contains(&x) && (0.0..=100.0).contains(&y);
    if !on_table {
        return ZoneResolution::outer();
    }

    let (top_scoring, bottom_scoring) = if is_flipped {
        (&layout.bottom_circle, &layout.top_circle)
    } else {
        (&layout.top_circle, &layout.bottom_circle)
    };
    for (geometry, scoring) in [
        (&layout.top_circle, top_scoring),
        (&layout.bottom_circle, bottom_scoring),
    ] {
        let distance = layout.distance_from(geometry, x, y);
        if distance > geometry.radius {
            continue;
        }
        if geometry.radius - distance < layout.boundary_threshold {
            // The circle edge borders whichever band the circle sits in.
            let Some(band) = layout.band_index(x).map(|i| &layout.bands[i]) else {
                return ZoneResolution::outer();
            };
            return ZoneResolution {
                zone_id: scoring.id,
                points: band.points,
                is_high: false,
                boundary_zone: Some(band.id),
            };
        }
        return ZoneResolution {
            zone_id: scoring.id,
            points: scoring.points,
            is_high: true,
            boundary_zone: None,
        };
    }

    let Some(index) = layout.band_index(x) else {
        return ZoneResolution::outer();
    };
    let band = &layout.bands[index];
    match layout.bands.get(index + 1) {
        Some(lower) if band.max_x - x < layout.boundary_threshold => ZoneResolution {
            zone_id: band.id,
            points: lower.points,
            is_high: false,
            boundary_zone: Some(lower.id),
        },
        _ => ZoneResolution {
            zone_id: band.id,
            points: band.points,
            is_high: true,
            boundary_zone: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn high(zone_id: &'static str, points: u32) -> ZoneResolution {
        ZoneResolution {
            zone_id,
            points,
            is_high: true,
            boundary_zone: None,
        }
    }

    fn edge(zone_id: &'static str, points: u32, boundary: &'static str) -> ZoneResolution {
        ZoneResolution {
            zone_id,
            points,
            is_high: false,
            boundary_zone: Some(boundary),
        }
    }

    #[test]
    fn test_outer_band_scores_three() {
        assert_eq!(resolve_zone(10.0, 50.0, false), high("3", 3));
    }

    #[test]
    fn test_band_interiors_score_their_value() {
        assert_eq!(resolve_zone(30.0, 50.0, false), high("2", 2));
        assert_eq!(resolve_zone(50.0, 50.0, false), high("1", 1));
        assert_eq!(resolve_zone(80.0, 50.0, false), high("0", 0));
    }

    #[test]
    fn test_band_edges_belong_to_the_inner_band() {
        assert_eq!(resolve_zone(0.0, 50.0, false), high("3", 3));
        assert_eq!(resolve_zone(20.0, 50.0, false), high("2", 2));
        assert_eq!(resolve_zone(40.0, 50.0, false), high("1", 1));
        assert_eq!(resolve_zone(60.0, 50.0, false), high("0", 0));
        assert_eq!(resolve_zone(100.0, 50.0, false), high("0", 0));
    }

    #[test]
    fn test_near_band_edge_scores_lower_band() {
        assert_eq!(resolve_zone(19.0, 50.0, false), edge("3", 2, "2"));
        assert_eq!(resolve_zone(39.5, 50.0, false), edge("2", 1, "1"));
        assert_eq!(resolve_zone(58.5, 50.0, false), edge("1", 0, "0"));
    }

    #[test]
    fn test_exactly_threshold_from_band_edge_is_high() {
        assert_eq!(resolve_zone(18.0, 50.0, false), high("3", 3));
        assert_eq!(resolve_zone(38.0, 50.0, false), high("2", 2));
    }

    #[test]
    fn test_innermost_band_has_no_boundary() {
        assert_eq!(resolve_zone(99.5, 50.0, false), high("0", 0));
    }

    #[test]
    fn test_off_table_is_outer_zone() {
        for (x, y) in [(-0.1, 50.0), (100.1, 50.0), (50.0, -1.0), (50.0, 101.0)] {
            assert_eq!(resolve_zone(x, y, false), ZoneResolution::outer());
        }
        assert_eq!(resolve_zone(f64::NAN, 50.0, false).zone_id, OUTER_ZONE_ID);
    }

    #[test]
    fn test_circle_centers_score_four_and_five() {
        assert_eq!(resolve_zone(50.0, 19.0, false), high("4", 4));
        assert_eq!(resolve_zone(50.0, 81.0, false), high("5", 5));
    }

    #[test]
    fn test_flip_swaps_circle_scores() {
        assert_eq!(resolve_zone(50.0, 19.0, true), high("5", 5));
        assert_eq!(resolve_zone(50.0, 81.0, true), high("4", 4));
    }

    #[test]
    fn test_flip_does_not_affect_bands() {
        for x in [10.0, 19.0, 30.0, 50.0, 80.0] {
            assert_eq!(resolve_zone(x, 50.0, true), resolve_zone(x, 50.0, false));
        }
    }

    #[test]
    fn test_vertical_offset_is_aspect_corrected() {
        // 6 percent down is 4 after correction: inside, and exactly the
        // threshold away from the edge.
        assert_eq!(resolve_zone(50.0, 25.0, false), high("4", 4));
        // 4 percent across is not corrected and lands on the edge strip.
        assert_eq!(resolve_zone(54.5, 19.0, false), edge("4", 1, "1"));
    }

    #[test]
    fn test_circle_edge_scores_surrounding_band() {
        assert_eq!(resolve_zone(50.0, 28.0, false), edge("4", 1, "1"));
        assert_eq!(resolve_zone(56.0, 81.0, false), edge("5", 1, "1"));
        assert_eq!(resolve_zone(56.0, 81.0, true), edge("4", 1, "1"));
    }

    #[test]
    fn test_just_outside_circle_falls_back_to_band() {
        assert_eq!(resolve_zone(50.0, 28.5, false), high("1", 1));
        assert_eq!(resolve_zone(56.5, 19.0, false), high("1", 1));
    }

    #[test]
    fn test_custom_layout_is_honoured() {
        // Arrange
        let layout = ZoneLayout {
            boundary_threshold: 0.5,
            ..ZoneLayout::STANDARD
        };

        // Act
        let resolved = resolve_zone_with(&layout, 19.0, 50.0, false);

        // Assert
        assert_eq!(resolved, high("3", 3));
    }
}
