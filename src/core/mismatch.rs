// mismatch.rs - Residue pair classification table

use std::str::FromStr;

/// Placeholder for a position with no usable call
pub const IGNORE_CHAR: u8 = b'.';

const TABLE_SIZE: usize = 256;

const UNAMBIGUOUS_BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// IUPAC nucleotide codes and the bases they stand for (A=1, C=2, G=4, T=8)
const IUPAC_CODES: [(u8, u8); 16] = [
    (b'A', 0b0001),
    (b'C', 0b0010),
    (b'G', 0b0100),
    (b'T', 0b1000),
    (b'U', 0b1000),
    (b'R', 0b0101),
    (b'Y', 0b1010),
    (b'S', 0b0110),
    (b'W', 0b1001),
    (b'K', 0b1100),
    (b'M', 0b0011),
    (b'B', 0b1110),
    (b'D', 0b1101),
    (b'H', 0b1011),
    (b'V', 0b0111),
    (b'N', 0b1111),
];

/// Which ambiguity rules the mismatch table encodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbiguityModel {
    /// ACGT substitutions plus the W/T pairing, everything else ignored
    #[default]
    Reference,
    /// Full IUPAC semantics: codes mismatch only when their base sets are disjoint
    Iupac,
}

impl FromStr for AmbiguityModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reference" | "ref" => Ok(AmbiguityModel::Reference),
            "iupac" => Ok(AmbiguityModel::Iupac),
            _ => Err(format!("Invalid ambiguity model: {}. Use: reference, iupac", s)),
        }
    }
}

impl AmbiguityModel {
    pub fn description(&self) -> &str {
        match self {
            AmbiguityModel::Reference => "ACGT substitutions (+ W/T)",
            AmbiguityModel::Iupac => "IUPAC ambiguity-aware (disjoint base sets only)",
        }
    }
}

/// Immutable 256x256 lookup answering "does this residue pair count as a SNP?"
#[derive(Clone)]
pub struct MismatchTable {
    cells: Box<[u8]>,
    model: AmbiguityModel,
}

impl std::fmt::Debug for MismatchTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MismatchTable")
            .field("model", &self.model)
            .field("mismatch_cells", &self.mismatch_count())
            .finish()
    }
}

impl MismatchTable {
    pub fn new(model: AmbiguityModel) -> Self {
        match model {
            AmbiguityModel::Reference => Self::reference(),
            AmbiguityModel::Iupac => Self::iupac(),
        }
    }

    /// Substitutions between A, C, G and T, plus W<->T
    pub fn reference() -> Self {
        let mut table = Self::empty(AmbiguityModel::Reference);
        for &x in &UNAMBIGUOUS_BASES {
            for &y in &UNAMBIGUOUS_BASES {
                if x != y {
                    table.set(x, y);
                }
            }
        }
        table.set(b'W', b'T');
        table.set(b'T', b'W');
        table
    }

    /// Two nucleotide codes mismatch when no base is compatible with both.
    /// Non-nucleotide bytes never count.
    pub fn iupac() -> Self {
        let mut table = Self::empty(AmbiguityModel::Iupac);
        for &(x, x_bases) in &IUPAC_CODES {
            for &(y, y_bases) in &IUPAC_CODES {
                if x_bases & y_bases == 0 {
                    table.set(x, y);
                }
            }
        }
        table
    }

    fn empty(model: AmbiguityModel) -> Self {
        Self {
            cells: vec![0u8; TABLE_SIZE * TABLE_SIZE].into_boxed_slice(),
            model,
        }
    }

    fn set(&mut self, a: u8, b: u8) {
        self.cells[usize::from(a) * TABLE_SIZE + usize::from(b)] = 1;
    }

    /// 1 if the pair counts as a SNP, 0 otherwise
    #[inline]
    pub fn classify(&self, a: u8, b: u8) -> u8 {
        self.cells[usize::from(a) * TABLE_SIZE + usize::from(b)]
    }

    #[inline]
    pub fn is_mismatch(&self, a: u8, b: u8) -> bool {
        self.classify(a, b) == 1
    }

    pub fn model(&self) -> AmbiguityModel {
        self.model
    }

    /// Number of ordered pairs that count as a mismatch
    pub fn mismatch_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }
}

impl Default for MismatchTable {
    fn default() -> Self {
        Self::reference()
    }
}
