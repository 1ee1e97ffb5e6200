//! Physical-space metadata: origin, spacing and an orthonormal direction
//! matrix, carried through conversions unchanged.

use nalgebra::{SMatrix, SVector};

/// Mapping between pixel indices and physical coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry<const D: usize> {
    /// Physical coordinates of the pixel at index zero.
    pub origin: SVector<f64, D>,
    /// Physical distance between neighbouring pixels, per axis.
    pub spacing: SVector<f64, D>,
    /// Direction cosines; expected orthonormal.
    pub direction: SMatrix<f64, D, D>,
}

impl<const D: usize> Default for Geometry<D> {
    fn default() -> Self {
        Self {
            origin: SVector::zeros(),
            spacing: SVector::repeat(1.0),
            direction: SMatrix::identity(),
        }
    }
}

impl<const D: usize> Geometry<D> {
    /// Physical point of the pixel at `index`:
    /// `origin + direction * (spacing .* index)`.
    pub fn index_to_physical_point(&self, index: [i64; D]) -> SVector<f64, D> {
        let scaled = SVector::<f64, D>::from_fn(|axis, _| index[axis] as f64 * self.spacing[axis]);
        self.origin + self.direction * scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_geometry_maps_index_to_itself() {
        let geo = Geometry::<3>::default();
        let p = geo.index_to_physical_point([2, -1, 4]);
        assert_eq!(p, SVector::<f64, 3>::new(2.0, -1.0, 4.0));
    }

    #[test]
    fn spacing_and_origin_are_applied() {
        let geo = Geometry::<2> {
            origin: SVector::<f64, 2>::new(10.0, -5.0),
            spacing: SVector::<f64, 2>::new(0.5, 2.0),
            ..Default::default()
        };
        let p = geo.index_to_physical_point([4, 3]);
        assert_eq!(p, SVector::<f64, 2>::new(12.0, 1.0));
    }
}
