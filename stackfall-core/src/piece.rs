//! Piece catalog
//!
//! Four shapes, each described by four `(row, col)` offsets from the piece
//! anchor. Row offsets grow away from the floor, so the anchor is always the
//! lowest row a piece occupies.

/// Offset of one piece cell from the anchor, as `(row, col)`
pub type Offset = (u8, u8);

/// The four shapes in spawn order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PieceKind {
    /// Three in a line with a nub; four distinct variations
    T,
    /// Four in a line; horizontal or vertical
    I,
    /// 2x2 square; variation is ignored
    O,
    /// Skew piece; two orientations
    S,
}

impl PieceKind {
    /// All kinds, indexed by their numeric id
    pub const ALL: [PieceKind; 4] = [PieceKind::T, PieceKind::I, PieceKind::O, PieceKind::S];

    /// Kind for a numeric id (taken modulo 4)
    pub const fn from_index(index: u8) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    /// Numeric id (0-3)
    pub const fn index(self) -> u8 {
        match self {
            PieceKind::T => 0,
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::S => 3,
        }
    }

    /// Kind spawned after this one (0 -> 1 -> 2 -> 3 -> 0)
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Rotation/mirroring index, always in 0-3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Variation(u8);

impl Variation {
    /// Variation for a raw counter value (taken modulo 4)
    pub const fn new(raw: u8) -> Self {
        Self(raw % 4)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Next variation, wrapping 3 -> 0
    pub const fn next(self) -> Self {
        Self::new(self.0 + 1)
    }
}

/// The four cells a piece occupies relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Footprint([Offset; 4]);

impl Footprint {
    pub const fn cells(&self) -> &[Offset; 4] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Offset> + '_ {
        self.0.iter().copied()
    }

    /// Number of rows spanned
    pub fn height(&self) -> u8 {
        self.iter().map(|(dr, _)| dr + 1).max().unwrap_or(0)
    }

    /// Number of columns spanned
    pub fn width(&self) -> u8 {
        self.iter().map(|(_, dc)| dc + 1).max().unwrap_or(0)
    }
}

const T_SHAPES: [Footprint; 4] = [
    Footprint([(0, 0), (1, 0), (1, 1), (2, 0)]),
    Footprint([(0, 0), (0, 1), (1, 1), (0, 2)]),
    Footprint([(0, 1), (1, 1), (1, 0), (2, 1)]),
    Footprint([(1, 0), (1, 1), (0, 1), (1, 2)]),
];

const I_SHAPES: [Footprint; 2] = [
    Footprint([(0, 0), (0, 1), (0, 2), (0, 3)]),
    Footprint([(0, 0), (1, 0), (2, 0), (3, 0)]),
];

const O_SHAPE: Footprint = Footprint([(0, 0), (0, 1), (1, 0), (1, 1)]);

const S_SHAPES: [Footprint; 2] = [
    Footprint([(0, 0), (0, 1), (1, 1), (1, 2)]),
    Footprint([(0, 0), (1, 0), (1, 1), (2, 1)]),
];

/// Look up the footprint of a shape in a given variation
pub const fn footprint(kind: PieceKind, variation: Variation) -> Footprint {
    let v = variation.index() as usize;
    match kind {
        PieceKind::T => T_SHAPES[v],
        PieceKind::I => I_SHAPES[v % 2],
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPES[v % 2],
    }
}

/// A shape in a specific variation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Piece {
    pub kind: PieceKind,
    pub variation: Variation,
}

impl Piece {
    pub const fn new(kind: PieceKind, variation: Variation) -> Self {
        Self { kind, variation }
    }

    pub const fn footprint(&self) -> Footprint {
        footprint(self.kind, self.variation)
    }
}
