//! Pinhole projection of world points onto the 800x600 surface.
//!
//! The camera sits on the ground plane at the player position and looks along
//! the player yaw. There is no clipping of partially visible segments: a point
//! either projects inside the surface or it is not visible at all.

use crate::types::{
    GroundPos, LineSegment, Point2D, Point3D, FOCAL_LENGTH, NEAR_PLANE, SCREEN_HEIGHT,
    SCREEN_WIDTH,
};

/// Camera pose: ground position and yaw in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub pos: GroundPos,
    pub yaw: f64,
}

impl Camera {
    pub const fn new(pos: GroundPos, yaw: f64) -> Self {
        Self { pos, yaw }
    }

    /// Camera-relative `(rx, rz)` of a world point; `rz` is depth.
    pub fn to_view(&self, point: Point3D) -> (f64, f64) {
        let dx = point.x - self.pos.x;
        let dz = point.z - self.pos.z;
        let (sin_a, cos_a) = (-self.yaw).sin_cos();
        let rx = dx * cos_a - dz * sin_a;
        let rz = dx * sin_a + dz * cos_a;
        (rx, rz)
    }

    /// Project a world point, or `None` when it is behind the near plane or
    /// lands outside the surface.
    pub fn project(&self, point: Point3D) -> Option<Point2D> {
        let (rx, rz) = self.to_view(point);
        if rz < NEAR_PLANE {
            return None;
        }
        let screen_x = SCREEN_WIDTH / 2.0 + (rx * FOCAL_LENGTH) / rz;
        let screen_y = SCREEN_HEIGHT / 2.0 - (point.y * FOCAL_LENGTH) / rz;
        let on_screen = (0.0..=SCREEN_WIDTH).contains(&screen_x)
            && (0.0..=SCREEN_HEIGHT).contains(&screen_y);
        on_screen.then_some(Point2D::new(screen_x, screen_y))
    }

    /// Project both endpoints; the segment survives only if both do.
    pub fn project_segment(&self, a: Point3D, b: Point3D) -> Option<LineSegment> {
        Some(LineSegment::new(self.project(a)?, self.project(b)?))
    }
}

/// Free-function form of [`Camera::project`].
pub fn project(point: Point3D, camera_pos: GroundPos, yaw: f64) -> Option<Point2D> {
    Camera::new(camera_pos, yaw).project(point)
}
