/// Algebraic properties of Transform3 exercised through the public API
use approx::assert_relative_eq;
use xform3d_core::{Angle, Transform3, Vector3f};

#[rustfmt::skip]
fn sample_transforms() -> Vec<Transform3> {
    let mut rotated = Transform3::new();
    rotated
        .rotate_x(Angle::from_degrees(30.0))
        .rotate_y(Angle::from_degrees(-45.0))
        .rotate_z(Angle::from_degrees(110.0));

    let mut mixed = Transform3::new();
    mixed
        .translate(Vector3f::new(4.0, -1.0, 2.5))
        .rotate_y_around(Angle::from_degrees(72.0), Vector3f::new(1.0, 1.0, 1.0))
        .scale_around(Vector3f::new(0.5, 2.0, 3.0), Vector3f::new(-2.0, 0.0, 1.0));

    vec![
        Transform3::IDENTITY,
        Transform3::translation(Vector3f::new(1.0, 2.0, 3.0)),
        Transform3::scaling(Vector3f::new(2.0, -3.0, 0.25)),
        rotated,
        mixed,
        Transform3::from_rows(
            2.0, 1.0, 0.0,  1.0,
            0.0, 3.0, 1.0, -2.0,
            1.0, 0.0, 4.0,  0.5,
            0.0, 0.0, 0.0,  1.0,
        ),
        // Projective: the bottom row is not (0, 0, 0, 1)
        Transform3::from_rows(
            2.0,  1.0, 0.0,  1.0,
            0.0,  3.0, 1.0, -2.0,
            1.0,  0.0, 4.0,  0.5,
            0.3, -0.7, 0.1,  1.5,
        ),
    ]
}

fn sample_points() -> Vec<Vector3f> {
    vec![
        Vector3f::zeros(),
        Vector3f::new(1.0, 0.0, 0.0),
        Vector3f::new(-3.5, 2.0, 7.25),
        Vector3f::new(0.1, -0.2, 0.3),
    ]
}

fn assert_approx_transform(actual: &Transform3, expected: &Transform3) {
    for (a, e) in actual.matrix().iter().zip(expected.matrix()) {
        assert_relative_eq!(a, e, epsilon = 1e-4, max_relative = 1e-4);
    }
}

#[test]
fn identity_is_neutral_for_combine() {
    for t in sample_transforms() {
        let mut left = Transform3::IDENTITY;
        left.combine(&t);
        assert_eq!(left, t);

        let mut right = t;
        right.combine(&Transform3::IDENTITY);
        assert_eq!(right, t);
    }
}

#[test]
fn combining_with_inverse_gives_identity() {
    for t in sample_transforms() {
        let mut product = t;
        product.combine(&t.inverse());
        assert_approx_transform(&product, &Transform3::IDENTITY);
        assert!(t.try_inverse().is_some());
    }
}

#[test]
#[rustfmt::skip]
fn singular_matrices_invert_to_exact_identity() {
    let zero = Transform3::from_row_major([0.0; 16]);
    assert_eq!(zero.inverse(), Transform3::IDENTITY);

    let rank_deficient = Transform3::from_rows(
        1.0, 2.0, 3.0, 4.0,
        2.0, 4.0, 6.0, 8.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );
    assert_eq!(rank_deficient.try_inverse(), None);
    assert_eq!(rank_deficient.inverse(), Transform3::IDENTITY);
}

#[test]
fn combine_is_associative() {
    let transforms = sample_transforms();
    for a in &transforms {
        for b in &transforms {
            for c in &transforms {
                assert_approx_transform(&((a * b) * *c), &(*a * (b * c)));
            }
        }
    }
}

#[test]
fn identity_leaves_points_unchanged() {
    for p in sample_points() {
        assert_eq!(Transform3::IDENTITY.transform_point(p), p);
    }
}

#[test]
fn translate_adds_offset() {
    let offset = Vector3f::new(-2.0, 0.5, 9.0);
    for p in sample_points() {
        let mut t = Transform3::new();
        t.translate(offset);
        assert_eq!(t.transform_point(p), p + offset);
    }
}

#[test]
fn rotations_are_orthogonal_and_preserve_length() {
    let origin = Vector3f::zeros();
    for degrees in [0.0, 15.0, 90.0, 137.0, -60.0, 270.0] {
        let angle = Angle::from_degrees(degrees);
        let rotations = [
            Transform3::rotation_x(angle),
            Transform3::rotation_y(angle),
            Transform3::rotation_z(angle),
        ];
        for rotation in rotations {
            assert_approx_transform(&(rotation * rotation.transpose()), &Transform3::IDENTITY);
            assert_approx_transform(&rotation.transpose(), &rotation.inverse());

            for p in sample_points() {
                let moved = rotation.transform_point(p) - rotation.transform_point(origin);
                assert_relative_eq!(moved.norm(), (p - origin).norm(), epsilon = 1e-5);
            }
        }
    }
}

#[test]
fn pivot_is_fixed_under_rotation_about_itself() {
    let center = Vector3f::new(3.0, -4.0, 1.5);
    for degrees in [10.0, 90.0, 180.0, 333.0] {
        let angle = Angle::from_degrees(degrees);

        let mut x = Transform3::new();
        x.rotate_x_around(angle, center);
        assert_relative_eq!(x.transform_point(center), center, epsilon = 1e-5);

        let mut y = Transform3::new();
        y.rotate_y_around(angle, center);
        assert_relative_eq!(y.transform_point(center), center, epsilon = 1e-5);

        let mut z = Transform3::new();
        z.rotate_z_around(angle, center);
        assert_relative_eq!(z.transform_point(center), center, epsilon = 1e-5);
    }
}

#[test]
fn pivot_rotation_matches_explicit_composition() {
    let center = Vector3f::new(1.0, 2.0, 3.0);
    let angle = Angle::from_degrees(40.0);

    let mut pivoted = Transform3::new();
    pivoted.rotate_z_around(angle, center);

    let mut composed = Transform3::new();
    composed.translate(center).rotate_z(angle).translate(-center);

    assert_approx_transform(&pivoted, &composed);
}

#[test]
fn equality_is_exact() {
    let a = Transform3::rotation_y(Angle::from_degrees(30.0));
    let b = Transform3::rotation_y(Angle::from_degrees(30.0));
    assert!(a == b);
    assert!(!(a != b));

    let mut elements = *a.matrix();
    elements[7] += 1e-3;
    let c = Transform3::from_row_major(elements);
    assert!(a != c);
    assert!(!(a == c));
}

#[test]
fn translate_example() {
    let mut t = Transform3::new();
    let p = t.translate(Vector3f::new(1.0, 2.0, 3.0)).transform_point(Vector3f::zeros());
    assert_eq!(p, Vector3f::new(1.0, 2.0, 3.0));
}

#[test]
fn rotate_z_example() {
    let mut t = Transform3::new();
    let p = t
        .rotate_z(Angle::from_degrees(90.0))
        .transform_point(Vector3f::new(1.0, 0.0, 0.0));
    assert_relative_eq!(p, Vector3f::new(0.0, 1.0, 0.0), epsilon = 1e-6);
}
