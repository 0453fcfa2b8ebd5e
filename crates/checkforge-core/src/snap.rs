//! Grid snapping and container clamping for element offsets.

use kurbo::{Point, Rect, Size};

/// Default grid size for snapping, in template pixels.
pub const GRID_SIZE: f64 = 10.0;

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    if grid_size <= 0.0 {
        return point;
    }
    Point::new(
        round_half_up(point.x / grid_size) * grid_size,
        round_half_up(point.y / grid_size) * grid_size,
    )
}

/// Round to the nearest integer, ties toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Clamp an element offset so an element of `element_size` stays inside
/// a container of `container` size.
///
/// The upper bound collapses to zero when the element is larger than the
/// container.
pub fn clamp_to_container(point: Point, container: Size, element_size: Size) -> Point {
    let max_x = container.width - element_size.width;
    let max_y = container.height - element_size.height;
    Point::new(point.x.min(max_x).max(0.0), point.y.min(max_y).max(0.0))
}

/// Check if a point lies within a rectangle (edges inclusive).
pub fn is_within_bounds(point: Point, bounds: Rect) -> bool {
    point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
}
