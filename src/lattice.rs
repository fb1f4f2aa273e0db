//! Integer lattice addressing for D-dimensional textures.
//!
//! Axis 0 varies fastest in memory, so a point `c` lives at
//! `c[0] + c[1] * r + c[2] * r^2` for resolution `r`.

/// A cube of `resolution^D` lattice points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice<const D: usize> {
    resolution: usize,
}

impl<const D: usize> Lattice<D> {
    pub fn new(resolution: usize) -> Self {
        Self { resolution }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Number of lattice points.
    pub fn len(&self) -> usize {
        self.resolution.pow(D as u32)
    }

    /// Number of lattice points, or `None` if it does not fit a `usize`.
    pub fn checked_len(&self) -> Option<usize> {
        self.resolution.checked_pow(D as u32)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of a lattice point.
    pub fn flatten(&self, coord: &[usize; D]) -> usize {
        coord
            .iter()
            .rev()
            .fold(0, |index, &c| index * self.resolution + c)
    }

    /// Lattice point of a flat index.
    pub fn unflatten(&self, mut index: usize) -> [usize; D] {
        let mut coord = [0; D];
        for c in coord.iter_mut() {
            *c = index % self.resolution;
            index /= self.resolution;
        }
        coord
    }

    /// Every lattice point in flat-index order.
    pub fn points(&self) -> LatticePoints<D> {
        let next = if D == 0 || self.resolution == 0 {
            None
        } else {
            Some([0; D])
        };
        LatticePoints {
            resolution: self.resolution,
            next,
        }
    }
}

/// Odometer over a lattice: axis 0 ticks on every step and carries upward.
#[derive(Debug, Clone)]
pub struct LatticePoints<const D: usize> {
    resolution: usize,
    next: Option<[usize; D]>,
}

impl<const D: usize> Iterator for LatticePoints<D> {
    type Item = [usize; D];

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        let mut succ = current;
        self.next = None;
        for axis in 0..D {
            succ[axis] += 1;
            if succ[axis] < self.resolution {
                self.next = Some(succ);
                break;
            }
            succ[axis] = 0;
        }

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_len() {
        assert_eq!(Lattice::<1>::new(5).len(), 5);
        assert_eq!(Lattice::<2>::new(4).len(), 16);
        assert_eq!(Lattice::<3>::new(3).len(), 27);
    }

    #[test]
    fn test_checked_len_overflow() {
        assert_eq!(Lattice::<3>::new(3).checked_len(), Some(27));
        assert_eq!(Lattice::<3>::new(1 << 22).checked_len(), None);
    }

    #[test]
    fn test_flatten_axis0_fastest() {
        let lattice = Lattice::<3>::new(4);
        assert_eq!(lattice.flatten(&[1, 0, 0]), 1);
        assert_eq!(lattice.flatten(&[0, 1, 0]), 4);
        assert_eq!(lattice.flatten(&[0, 0, 1]), 16);
        assert_eq!(lattice.flatten(&[3, 2, 1]), 3 + 2 * 4 + 16);
    }

    #[test]
    fn test_unflatten_round_trip() {
        let lattice = Lattice::<3>::new(5);
        for index in 0..lattice.len() {
            let coord = lattice.unflatten(index);
            assert!(coord.iter().all(|&c| c < 5));
            assert_eq!(lattice.flatten(&coord), index);
        }
    }

    #[test]
    fn test_points_follow_flat_order() {
        let lattice = Lattice::<2>::new(3);
        let points: Vec<_> = lattice.points().collect();

        assert_eq!(points.len(), 9);
        assert_eq!(points[0], [0, 0]);
        assert_eq!(points[1], [1, 0]);
        assert_eq!(points[3], [0, 1]);
        assert_eq!(points[8], [2, 2]);
        for (index, point) in points.iter().enumerate() {
            assert_eq!(lattice.flatten(point), index);
            assert_eq!(lattice.unflatten(index), *point);
        }
    }

    #[test]
    fn test_empty_lattice_yields_nothing() {
        assert_eq!(Lattice::<2>::new(0).points().count(), 0);
        assert!(Lattice::<2>::new(0).is_empty());
    }
}
