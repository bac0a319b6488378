use ndarray::Array3;

/// Single coordinate axis used for the grid edge and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Three-dimensional coordinates `(x, y, z)`.
pub type Coord3 = (Coord, Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Grids are stored `[z, y, x]` so the standard layout keeps `x` contiguous:
/// `index = x + y * n + z * n²`.
impl ToNdIndex for Coord3 {
    type Output = [usize; 3];

    fn to_nd_index(self) -> Self::Output {
        [self.2.into(), self.1.into(), self.0.into()]
    }
}

/// Shape of a cubic grid with edge `size`, in nd index order.
pub const fn cube_shape(size: Coord) -> [usize; 3] {
    let size = size as usize;
    [size, size, size]
}

pub const fn cube(size: Coord) -> CellCount {
    let size = size as CellCount;
    size.saturating_mul(size).saturating_mul(size)
}

pub const fn in_bounds((x, y, z): Coord3, size: Coord) -> bool {
    x < size && y < size && z < size
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord3) -> NeighborIter;
}

impl<T> NeighborIterExt for Array3<T> {
    fn iter_neighbors(&self, index: Coord3) -> NeighborIter {
        let (edge, _, _) = self.dim();
        NeighborIter::new(index, edge.try_into().unwrap_or(Coord::MAX))
    }
}

const fn displacements() -> [(i8, i8, i8); 26] {
    let mut out = [(0, 0, 0); 26];
    let mut i = 0;
    let mut dz = -1;
    while dz <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dx = -1;
            while dx <= 1 {
                if dx != 0 || dy != 0 || dz != 0 {
                    out[i] = (dx, dy, dz);
                    i += 1;
                }
                dx += 1;
            }
            dy += 1;
        }
        dz += 1;
    }
    out
}

/// Every offset of the 3×3×3 cube around a cell, minus the cell itself.
pub const DISPLACEMENTS: [(i8, i8, i8); 26] = displacements();

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord3, delta: (i8, i8, i8), bound: Coord) -> Option<Coord3> {
    let (x, y, z) = coords;
    let (dx, dy, dz) = delta;

    let next_x = x.checked_add_signed(dx)?;
    let next_y = y.checked_add_signed(dy)?;
    let next_z = z.checked_add_signed(dz)?;

    let next = (next_x, next_y, next_z);
    in_bounds(next, bound).then_some(next)
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord3,
    bound: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord3, bound: Coord) -> Self {
        Self {
            center,
            bound,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord3;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bound);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
