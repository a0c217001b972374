/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Geometric measures of a periodic cell used to size lattice sums

use super::cell::Lattice;
use super::vector::Vector3D;

/// Radius of the defect-region sphere for a cell
///
/// For each lattice vector a_k the spacing of the lattice planes spanned by
/// the other two vectors is `|(a_i × a_j) · a_k| / |a_i × a_j|`; the radius
/// is half the largest of the three spacings.
///
/// # Arguments
///
/// * `lattice` - The supercell lattice
///
/// # Returns
///
/// The radius in Å (always positive for a valid lattice)
pub fn max_sphere_radius(lattice: &Lattice) -> f64 {
    let vectors = lattice.vectors();

    (0..3)
        .map(|k| {
            let a_i = vectors[(k + 1) % 3];
            let a_j = vectors[(k + 2) % 3];
            vectors[k].triple(&a_i, &a_j).abs() / a_i.cross(&a_j).length()
        })
        .fold(0.0_f64, f64::max)
        / 2.0
}

/// Estimate of the number of lattice translations needed to cover a sphere
///
/// Each axis contributes `ceil(max_length / |v|)`, clamped to at least one so
/// that a zero radius still counts the origin cell.
///
/// # Arguments
///
/// * `vectors` - Real or reciprocal lattice vectors
/// * `max_length` - Radius of the sphere in the same units as the vectors
///
/// # Returns
///
/// The product of the per-axis counts
pub fn grid_count(vectors: &[Vector3D; 3], max_length: f64) -> usize {
    vectors
        .iter()
        .map(|v| ((max_length / v.length()).ceil() as usize).max(1))
        .product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_max_sphere_radius_cubic() {
        let lattice = Lattice::cubic(10.0).unwrap();
        assert_relative_eq!(max_sphere_radius(&lattice), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_max_sphere_radius_uses_largest_spacing() {
        let lattice = Lattice::orthorhombic(4.0, 6.0, 10.0).unwrap();
        assert_relative_eq!(max_sphere_radius(&lattice), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_grid_count() {
        let vectors = Lattice::orthorhombic(2.0, 3.0, 4.0).unwrap().vectors();
        assert_eq!(grid_count(&vectors, 0.0), 1);
        assert_eq!(grid_count(&vectors, 1.0), 1);
        assert_eq!(grid_count(&vectors, 6.0), 3 * 2 * 2);
        assert_eq!(grid_count(&vectors, 8.5), 5 * 3 * 3);
    }
}
