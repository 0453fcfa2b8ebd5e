//! Layouts: element offsets, validation, normalization and bounds.

use crate::element::{ElementId, default_positions};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Mapping from element to its pixel offset relative to the element's anchor.
///
/// A layout may be partial (e.g. freshly imported or holding only the
/// elements a user moved); [`Layout::merge_with_defaults`] makes it complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    positions: BTreeMap<ElementId, Point>,
}

impl Layout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout with every element at its default offset.
    pub fn defaults() -> Self {
        default_positions()
    }

    /// Offset of an element, if present.
    pub fn get(&self, id: ElementId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    /// Offset of an element, falling back to the default offset.
    pub fn position(&self, id: ElementId) -> Point {
        self.get(id).unwrap_or(Point::ZERO)
    }

    /// Set the offset of an element.
    pub fn set(&mut self, id: ElementId, position: Point) {
        self.positions.insert(id, position);
    }

    /// Iterate over present elements in template order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, Point)> + '_ {
        self.positions.iter().map(|(id, p)| (*id, *p))
    }

    /// Number of elements present.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if no elements are present.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Elements of the fixed set that this layout lacks.
    pub fn missing_elements(&self) -> Vec<ElementId> {
        ElementId::ALL
            .into_iter()
            .filter(|id| !self.positions.contains_key(id))
            .collect()
    }

    /// Check if every element has an offset.
    pub fn is_complete(&self) -> bool {
        self.missing_elements().is_empty()
    }

    /// Complete layout: defaults overridden by every offset present here.
    pub fn merge_with_defaults(&self) -> Layout {
        let mut merged = default_positions();
        merged.positions.extend(self.positions.iter().map(|(id, p)| (*id, *p)));
        merged
    }

    /// Bounding box of all offsets.
    ///
    /// An empty layout has all-zero bounds.
    pub fn bounds(&self) -> Rect {
        let mut points = self.positions.values();
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        points.fold(Rect::from_points(*first, *first), |acc, p| {
            Rect::new(acc.x0.min(p.x), acc.y0.min(p.y), acc.x1.max(p.x), acc.y1.max(p.y))
        })
    }

    /// Shift every offset so no coordinate is negative.
    ///
    /// Each axis with a negative minimum is shifted by the absolute value
    /// of that minimum; a layout without negative coordinates is returned
    /// unchanged.
    pub fn normalize(&self) -> Layout {
        let bounds = self.bounds();
        let shift_x = if bounds.x0 < 0.0 { -bounds.x0 } else { 0.0 };
        let shift_y = if bounds.y0 < 0.0 { -bounds.y0 } else { 0.0 };
        if shift_x == 0.0 && shift_y == 0.0 {
            return self.clone();
        }
        self.positions
            .iter()
            .map(|(id, p)| (*id, Point::new(p.x + shift_x, p.y + shift_y)))
            .collect()
    }

    /// Summary statistics over the present offsets.
    pub fn stats(&self) -> LayoutStats {
        let bounds = self.bounds();
        let count = self.positions.len();
        let average_position = if count == 0 {
            Point::ZERO
        } else {
            let (sx, sy) = self
                .positions
                .values()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
            Point::new(sx / count as f64, sy / count as f64)
        };
        LayoutStats {
            element_count: count,
            bounds,
            area: bounds.width() * bounds.height(),
            average_position,
        }
    }
}

impl FromIterator<(ElementId, Point)> for Layout {
    fn from_iter<I: IntoIterator<Item = (ElementId, Point)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Summary of a layout's offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStats {
    pub element_count: usize,
    pub bounds: Rect,
    pub area: f64,
    pub average_position: Point,
}

/// Outcome of checking untyped layout data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutValidation {
    pub valid: bool,
    pub error: Option<String>,
}

/// Validate untyped layout data.
///
/// Valid iff `data` is an object holding numeric `x` and `y` for every
/// element of the fixed set. Extra keys are not inspected.
pub fn validate_layout(data: &Value) -> LayoutValidation {
    let Some(object) = data.as_object() else {
        return LayoutValidation {
            valid: false,
            error: Some("Layout data must be an object".to_string()),
        };
    };

    let invalid: Vec<&str> = ElementId::ALL
        .into_iter()
        .filter(|id| {
            let entry = object.get(id.as_str());
            let numeric = |axis: &str| entry.and_then(|e| e.get(axis)).is_some_and(Value::is_number);
            !(numeric("x") && numeric("y"))
        })
        .map(ElementId::as_str)
        .collect();

    if invalid.is_empty() {
        LayoutValidation {
            valid: true,
            error: None,
        }
    } else {
        LayoutValidation {
            valid: false,
            error: Some(format!("Missing or invalid elements: {}", invalid.join(", "))),
        }
    }
}

/// A layout persisted under a user-chosen name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLayout {
    #[serde(flatten)]
    pub layout: Layout,
    pub saved_at: String,
    pub id: String,
}

/// CSS transform that places an element at `position`.
pub fn position_to_transform(position: Point) -> String {
    format!("translate({}px, {}px)", position.x, position.y)
}

/// Distance between two offsets.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}
