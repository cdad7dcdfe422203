// Host-side tests for the flat particle position buffer.

use glam::Vec3;
use morph_core::*;

#[test]
fn views_agree_on_layout() {
    let points = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 5.5, 0.0)];
    let buf = PositionBuffer::from_points(&points);
    assert_eq!(buf.count(), 2);
    assert_eq!(buf.as_slice(), &[1.0, 2.0, 3.0, -4.0, 5.5, 0.0]);
    assert_eq!(buf.points(), &points);
    assert_eq!(buf.as_bytes().len(), 6 * std::mem::size_of::<f32>());
    assert_eq!(buf.max_abs_coord(), 5.5);
}

#[test]
fn writes_through_points_land_in_flat_storage() {
    let mut buf = PositionBuffer::zeroed(3);
    buf.points_mut()[1] = Vec3::splat(7.0);
    assert_eq!(&buf.as_slice()[3..6], &[7.0, 7.0, 7.0]);
    buf.as_mut_slice()[8] = f32::NAN;
    assert!(!buf.all_finite());
}

#[test]
fn empty_buffer_has_no_points() {
    let buf = PositionBuffer::zeroed(0);
    assert!(buf.is_empty());
    assert_eq!(buf.count(), 0);
    assert!(buf.points().is_empty());
    assert_eq!(buf.max_abs_coord(), 0.0);
}
