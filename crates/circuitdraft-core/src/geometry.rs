//! Rotation geometry for shape instances, independent of any renderer.

use crate::store::ShapeInstance;
use kurbo::{Affine, Point, Rect};

/// Rotation of an instance about its own center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedTransform {
    /// Clockwise angle in degrees (screen coordinates, y down).
    pub angle: f64,
    /// Pivot point.
    pub center: Point,
}

impl RotatedTransform {
    /// Angle in radians.
    pub fn radians(&self) -> f64 {
        self.angle.to_radians()
    }

    /// Affine mapping unrotated instance coordinates to canvas coordinates.
    pub fn to_affine(&self) -> Affine {
        Affine::rotate_about(self.radians(), self.center)
    }

    /// SVG `transform` attribute value, e.g. `rotate(90 130 110)`.
    pub fn svg(&self) -> String {
        format!("rotate({} {} {})", self.angle, self.center.x, self.center.y)
    }
}

/// Rotation transform for an instance.
pub fn rotated_transform(instance: &ShapeInstance) -> RotatedTransform {
    RotatedTransform {
        angle: f64::from(instance.rotation_degrees),
        center: instance.center(),
    }
}

/// The four corners of an instance after rotation.
pub fn rotated_corners(instance: &ShapeInstance) -> [Point; 4] {
    let rect = instance.as_rect();
    let affine = rotated_transform(instance).to_affine();
    [
        affine * Point::new(rect.x0, rect.y0),
        affine * Point::new(rect.x1, rect.y0),
        affine * Point::new(rect.x1, rect.y1),
        affine * Point::new(rect.x0, rect.y1),
    ]
}

/// Axis-aligned bounding box of the rotated instance.
pub fn rotated_bounds(instance: &ShapeInstance) -> Rect {
    if instance.rotation_degrees == 0 {
        return instance.as_rect();
    }

    let corners = rotated_corners(instance);
    let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    Rect::new(min_x, min_y, max_x, max_y)
}

/// Check if a canvas point falls on the rotated instance.
pub fn hit_test(instance: &ShapeInstance, point: Point, tolerance: f64) -> bool {
    // Undo the rotation on the point instead of rotating the rectangle.
    let local = rotated_transform(instance).to_affine().inverse() * point;
    instance.as_rect().inflate(tolerance, tolerance).contains(local)
}
