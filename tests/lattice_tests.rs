/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use defcorr_rs::lattice::{grid_count, max_sphere_radius, Lattice, LatticeError, Vector3D};
use rstest::rstest;

#[rstest]
#[case([0, 1, 2])]
#[case([1, 2, 0])]
#[case([2, 0, 1])]
#[case([2, 1, 0])]
fn test_max_sphere_radius_ignores_vector_order(#[case] order: [usize; 3]) {
    let matrix = [[5.0, 0.0, 0.0], [1.0, 6.0, 0.0], [0.5, 0.8, 7.0]];
    let reference = max_sphere_radius(&Lattice::new(matrix).unwrap());

    let permuted = Lattice::new([matrix[order[0]], matrix[order[1]], matrix[order[2]]]).unwrap();
    assert_relative_eq!(max_sphere_radius(&permuted), reference, epsilon = 1e-12);
}

#[test]
fn test_max_sphere_radius_orthorhombic() {
    let lattice = Lattice::orthorhombic(8.0, 10.0, 12.0).unwrap();
    assert_relative_eq!(max_sphere_radius(&lattice), 6.0);
}

#[test]
fn test_grid_count() {
    let vectors = [
        Vector3D::new(10.0, 0.0, 0.0),
        Vector3D::new(0.0, 10.0, 0.0),
        Vector3D::new(0.0, 0.0, 20.0),
    ];

    assert_eq!(grid_count(&vectors, 0.0), 1);
    assert_eq!(grid_count(&vectors, 15.0), 2 * 2 * 1);
    assert_eq!(grid_count(&vectors, 25.0), 3 * 3 * 2);
}

#[test]
fn test_reciprocal_lattice_includes_two_pi() {
    let lattice = Lattice::orthorhombic(4.0, 5.0, 8.0).unwrap();
    let reciprocal = lattice.reciprocal_lattice();
    let b = reciprocal.matrix();

    assert_relative_eq!(b[(0, 0)], std::f64::consts::PI / 2.0, epsilon = 1e-12);
    assert_relative_eq!(b[(1, 1)], 2.0 * std::f64::consts::PI / 5.0, epsilon = 1e-12);
    assert_relative_eq!(b[(2, 2)], std::f64::consts::PI / 4.0, epsilon = 1e-12);
    assert_relative_eq!(reciprocal.volume(), 8.0 * std::f64::consts::PI.powi(3) / 160.0, epsilon = 1e-10);
}

#[test]
fn test_minimum_image_distance_wraps_across_boundary() {
    let lattice = Lattice::cubic(10.0).unwrap();
    let d = lattice.minimum_image_distance(&[0.05, 0.0, 0.0], &[0.95, 0.0, 0.0]);
    assert_relative_eq!(d, 1.0, epsilon = 1e-12);
}

#[test]
fn test_minimum_image_distance_in_sheared_supercell() {
    // Wrapping alone lands 20 Å away; the nearest image is three cells along a1
    let lattice = Lattice::new([[10.0, 0.0, 0.0], [50.0, 1.0, 0.0], [0.0, 0.0, 10.0]]).unwrap();
    let wrapped = lattice.frac_to_cart(&[0.5, -0.5, 0.0]).length();
    let d = lattice.minimum_image_distance(&[0.0, 0.0, 0.0], &[-2.5, 0.5, 0.0]);

    assert!(wrapped > 20.0);
    assert_relative_eq!(d, 0.5, epsilon = 1e-10);
}

#[test]
fn test_singular_lattice_is_rejected() {
    let result = Lattice::new([[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
    assert!(matches!(result, Err(LatticeError::Singular(_))));
}
