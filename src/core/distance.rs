// distance.rs - Core distance calculation engine

use std::sync::Arc;

use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::core::mismatch::{MismatchTable, IGNORE_CHAR};
use crate::data::Alignment;

/// Symmetric N x N matrix of SNP counts, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<usize>,
}

impl DistanceMatrix {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.size + j]
    }

    fn set(&mut self, i: usize, j: usize, value: usize) {
        self.cells[i * self.size + j] = value;
    }

    pub fn row(&self, i: usize) -> &[usize] {
        &self.cells[i * self.size..(i + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        // chunks(0) panics, and an empty matrix has no rows anyway
        self.cells.chunks(self.size.max(1))
    }

    /// Largest off-diagonal value, None below two sequences
    pub fn max_distance(&self) -> Option<usize> {
        (0..self.size)
            .flat_map(|i| (0..self.size).filter(move |&j| j != i).map(move |j| (i, j)))
            .map(|(i, j)| self.get(i, j))
            .max()
    }
}

/// Distance calculation engine
#[derive(Debug, Clone)]
pub struct DistanceEngine {
    table: Arc<MismatchTable>,
}

impl DistanceEngine {
    pub fn new(table: Arc<MismatchTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &MismatchTable {
        &self.table
    }

    /// Count positions where the two sequences differ according to the table.
    /// Positions holding the ignore sentinel in either sequence never count.
    pub fn pair_distance(&self, a: &[u8], b: &[u8]) -> usize {
        debug_assert_eq!(a.len(), b.len(), "aligned sequences must share one length");
        a.iter()
            .zip(b)
            .filter(|&(&x, &y)| x != y && x != IGNORE_CHAR && y != IGNORE_CHAR)
            .map(|(&x, &y)| usize::from(self.table.classify(x, y)))
            .sum()
    }

    /// Full distance matrix for the alignment
    pub fn compute(&self, alignment: &Alignment) -> DistanceMatrix {
        self.compute_with_progress(alignment, &ProgressBar::hidden())
    }

    /// Same as [`compute`](Self::compute), ticking `progress` once per finished row.
    ///
    /// Only the upper triangle is computed; rows run in parallel and the
    /// result is mirrored, so the matrix does not depend on thread count.
    pub fn compute_with_progress(&self, alignment: &Alignment, progress: &ProgressBar) -> DistanceMatrix {
        let n_samples = alignment.len();

        let upper_triangle: Vec<Vec<usize>> = (0..n_samples)
            .into_par_iter()
            .map(|i| {
                let seq_i = alignment.sequence(i);
                let row = (i + 1..n_samples)
                    .map(|j| self.pair_distance(seq_i, alignment.sequence(j)))
                    .collect();
                progress.inc(1);
                row
            })
            .collect();

        let mut matrix = DistanceMatrix::zeros(n_samples);
        for (i, row) in upper_triangle.into_iter().enumerate() {
            for (offset, distance) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                matrix.set(i, j, distance);
                matrix.set(j, i, distance);
            }
        }

        matrix
    }
}

impl Default for DistanceEngine {
    fn default() -> Self {
        Self::new(Arc::new(MismatchTable::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AmbiguityModel;
    use crate::data::SequenceRecord;

    fn alignment(records: &[(&str, &str)]) -> Alignment {
        Alignment::from_records(
            records
                .iter()
                .map(|(name, seq)| SequenceRecord::new(*name, seq.as_bytes())),
        )
        .unwrap()
    }

    /// Straightforward every-ordered-pair loop
    fn naive_matrix(engine: &DistanceEngine, alignment: &Alignment) -> Vec<Vec<usize>> {
        (0..alignment.len())
            .map(|i| {
                (0..alignment.len())
                    .map(|j| engine.pair_distance(alignment.sequence(i), alignment.sequence(j)))
                    .collect()
            })
            .collect()
    }

    fn assert_matrix_properties(matrix: &DistanceMatrix, length: usize) {
        for i in 0..matrix.len() {
            assert_eq!(matrix.get(i, i), 0);
            for j in 0..matrix.len() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
                assert!(matrix.get(i, j) <= length);
            }
        }
    }

    #[test]
    fn test_three_sequence_scenario() {
        let aln = alignment(&[("s1", "ACGT"), ("s2", "ACGA"), ("s3", "ACGT")]);
        let matrix = DistanceEngine::default().compute(&aln);

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.row(0), &[0, 1, 0]);
        assert_eq!(matrix.row(1), &[1, 0, 1]);
        assert_eq!(matrix.row(2), &[0, 1, 0]);
        assert_matrix_properties(&matrix, 4);
    }

    #[test]
    fn test_ignore_sentinel_excluded() {
        let engine = DistanceEngine::default();
        assert_eq!(engine.pair_distance(b"AC.T", b"ACGT"), 0);
        assert_eq!(engine.pair_distance(b"ACGT", b"AC.T"), 0);
        assert_eq!(engine.pair_distance(b"....", b"TGCA"), 0);
        assert_eq!(engine.pair_distance(b"A.GT", b"T.GA"), 2);
    }

    #[test]
    fn test_all_positions_differ() {
        let engine = DistanceEngine::default();
        assert_eq!(engine.pair_distance(b"ACGT", b"TGCA"), 4);
    }

    #[test]
    fn test_identical_sequences() {
        for model in [AmbiguityModel::Reference, AmbiguityModel::Iupac] {
            let engine = DistanceEngine::new(Arc::new(MismatchTable::new(model)));
            assert_eq!(engine.pair_distance(b"ACGTNRYW-", b"ACGTNRYW-"), 0);
        }
    }

    #[test]
    fn test_ambiguity_models() {
        let reference = DistanceEngine::new(Arc::new(MismatchTable::reference()));
        let iupac = DistanceEngine::new(Arc::new(MismatchTable::iupac()));

        // W/T is seeded in the reference table only
        assert_eq!(reference.pair_distance(b"AWR", b"ATY"), 1);
        assert_eq!(iupac.pair_distance(b"AWR", b"ATY"), 1);
        assert_eq!(reference.pair_distance(b"R", b"Y"), 0);
        assert_eq!(iupac.pair_distance(b"R", b"Y"), 1);
        assert_eq!(iupac.pair_distance(b"W", b"T"), 0);
    }

    #[test]
    fn test_single_sequence_and_empty() {
        let engine = DistanceEngine::default();

        let matrix = engine.compute(&alignment(&[("only", "ACGT")]));
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.get(0, 0), 0);
        assert_eq!(matrix.max_distance(), None);

        let matrix = engine.compute(&Alignment::new());
        assert!(matrix.is_empty());
        assert_eq!(matrix.rows().count(), 0);
    }

    #[test]
    fn test_matches_naive_full_loop() {
        let bases = [b'A', b'C', b'G', b'T', b'.', b'N', b'W'];
        let mut state: u32 = 12345;
        let records: Vec<SequenceRecord> = (0..17)
            .map(|i| {
                let residues: Vec<u8> = (0..61)
                    .map(|_| {
                        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                        bases[(state >> 16) as usize % bases.len()]
                    })
                    .collect();
                SequenceRecord::new(format!("seq{}", i), residues)
            })
            .collect();
        let aln = Alignment::from_records(records).unwrap();

        let engine = DistanceEngine::default();
        let matrix = engine.compute(&aln);
        let expected = naive_matrix(&engine, &aln);

        for (i, row) in matrix.rows().enumerate() {
            assert_eq!(row, expected[i].as_slice());
        }
        assert_matrix_properties(&matrix, 61);
        assert!(matrix.max_distance().unwrap() > 0);
    }

    #[test]
    fn test_progress_ticks_per_row() {
        let aln = alignment(&[("a", "AC"), ("b", "AG"), ("c", "TG")]);
        let progress = ProgressBar::hidden();
        progress.set_length(3);
        let matrix = DistanceEngine::default().compute_with_progress(&aln, &progress);

        assert_eq!(progress.position(), 3);
        assert_eq!(matrix.get(0, 2), 2);
        assert_eq!(matrix.max_distance(), Some(2));
    }
}
