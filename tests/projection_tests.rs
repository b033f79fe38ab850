//! Projection properties over many camera poses.

use approx::assert_relative_eq;
use battlezone::core::{project, Camera};
use battlezone::types::{GroundPos, Point3D, NEAR_PLANE, SCREEN_HEIGHT, SCREEN_WIDTH};

fn poses() -> impl Iterator<Item = Camera> {
    (-3..=3).flat_map(|i| {
        (-3..=3).flat_map(move |j| {
            (0..8).map(move |k| Camera {
                pos: GroundPos::new(f64::from(i) * 137.0, f64::from(j) * 91.0),
                yaw: f64::from(k) * std::f64::consts::FRAC_PI_4 - 0.3,
            })
        })
    })
}

#[test]
fn test_visible_points_are_in_front_and_on_screen() {
    for cam in poses() {
        for x in (-600..=600).step_by(50) {
            for z in (-600..=600).step_by(50) {
                for y in [0.0, 40.0] {
                    let p = Point3D::new(f64::from(x), y, f64::from(z));
                    if let Some(s) = cam.project(p) {
                        let (_, rz) = cam.to_view(p);
                        assert!(rz >= NEAR_PLANE, "projected point behind near plane");
                        assert!((0.0..=SCREEN_WIDTH).contains(&s.x));
                        assert!((0.0..=SCREEN_HEIGHT).contains(&s.y));
                    }
                }
            }
        }
    }
}

#[test]
fn test_free_function_matches_camera() {
    for cam in poses() {
        let p = Point3D::new(30.0, 0.0, 200.0);
        assert_eq!(project(p, cam.pos, cam.yaw), cam.project(p));
    }
}

#[test]
fn test_straight_ahead_lands_on_center_column() {
    let cam = Camera {
        pos: GroundPos::new(0.0, 0.0),
        yaw: 0.0,
    };
    let s = cam.project(Point3D::new(0.0, 0.0, 100.0)).unwrap();
    assert_relative_eq!(s.x, 400.0);
    assert_relative_eq!(s.y, 300.0);

    let raised = cam.project(Point3D::new(0.0, 40.0, 400.0)).unwrap();
    assert_relative_eq!(raised.y, 260.0);
}

#[test]
fn test_point_on_near_plane_boundary() {
    let cam = Camera {
        pos: GroundPos::new(0.0, 0.0),
        yaw: 0.0,
    };
    assert!(cam.project(Point3D::new(0.0, 0.0, NEAR_PLANE)).is_some());
    assert!(cam.project(Point3D::new(0.0, 0.0, NEAR_PLANE - 0.001)).is_none());
}
