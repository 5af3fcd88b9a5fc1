//! Precomputed marching squares tables.
//!
//! # Cell Topology
//!
//! ```text
//!   3 ────── e2 ────── 2
//!   │                  │
//!   e3                 e1
//!   │                  │
//!   0 ────── e0 ────── 1
//! ```
//!
//! Corners wind counter-clockwise from the bottom-left. Edge `i` joins corner `i`
//! and corner `(i + 1) % 4`. A corner is "inside" when its sample is below the
//! threshold, and its bit in the 4-bit case code is then set.

/// Side of a cell crossed by the contour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Edge {
    Bottom = 0,
    Right = 1,
    Top = 2,
    Left = 3,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Bottom, Edge::Right, Edge::Top, Edge::Left];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Corner indices this edge is interpolated between, lower coordinate first
    ///
    /// The top and left edges run against the winding here so that an edge shared
    /// by two neighbouring cells is always interpolated in the same direction.
    #[inline]
    pub fn corners(self) -> [usize; 2] {
        EDGE_CORNERS[self.index()]
    }
}

/// Edge endpoint corner indices, ordered by increasing grid coordinate.
pub const EDGE_CORNERS: [[usize; 2]; 4] = [
    [0, 1], // bottom
    [1, 2], // right
    [3, 2], // top
    [0, 3], // left
];

/// Bitmask of crossed edges for each case code.
///
/// Symmetric under complement: `EDGE_TABLE[c] == EDGE_TABLE[15 - c]`.
pub const EDGE_TABLE: [u8; 16] = [
    0b0000, // 0
    0b1001, // 1: corner 0 inside
    0b0011, // 2: corner 1 inside
    0b1010, // 3
    0b0110, // 4: corner 2 inside
    0b1111, // 5: saddle
    0b0101, // 6
    0b1100, // 7
    0b1100, // 8: corner 3 inside
    0b0101, // 9
    0b1111, // 10: saddle
    0b0110, // 11
    0b1010, // 12
    0b0011, // 13
    0b1001, // 14
    0b0000, // 15
];

use Edge::{Bottom, Left, Right, Top};

/// Edge pairs joined into segments for each case code.
///
/// Saddle codes hold the pairing used when the cell centre is outside; see
/// [`SADDLE_CENTER_INSIDE`] for the alternative.
pub const LINE_TABLE: [&[[Edge; 2]]; 16] = [
    &[],
    &[[Left, Bottom]],
    &[[Bottom, Right]],
    &[[Left, Right]],
    &[[Right, Top]],
    &[[Left, Bottom], [Right, Top]],
    &[[Bottom, Top]],
    &[[Left, Top]],
    &[[Top, Left]],
    &[[Bottom, Top]],
    &[[Bottom, Right], [Top, Left]],
    &[[Right, Top]],
    &[[Right, Left]],
    &[[Bottom, Right]],
    &[[Left, Bottom]],
    &[],
];

/// Saddle pairings when the cell centre is inside: the inside corners connect
/// through the centre, so the segments cut off the two outside corners instead.
pub const SADDLE_CENTER_INSIDE: [&[[Edge; 2]]; 2] = [
    // code 5: corners 1 and 3 are outside
    &[[Bottom, Right], [Top, Left]],
    // code 10: corners 0 and 2 are outside
    &[[Left, Bottom], [Right, Top]],
];

/// True for the two checkerboard codes where four edges are crossed
#[inline]
pub fn is_saddle(code: u8) -> bool {
    code == 5 || code == 10
}
