// alignment.rs - In-memory alignment of equal-length sequences

use crate::data::LoadError;

/// A named sequence of residue codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub name: String,
    pub residues: Vec<u8>,
}

impl SequenceRecord {
    pub fn new(name: impl Into<String>, residues: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            residues: residues.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// Ordered collection of sequences sharing one length.
/// The length is fixed by the first record pushed.
#[derive(Debug, Clone, Default)]
pub struct Alignment {
    records: Vec<SequenceRecord>,
    length: Option<usize>,
}

impl Alignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records, failing on the first length mismatch
    pub fn from_records<I>(records: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = SequenceRecord>,
    {
        let mut alignment = Self::new();
        for record in records {
            alignment.push(record)?;
        }
        Ok(alignment)
    }

    /// Fails when the record's length differs from the alignment's
    pub fn check_length(&self, record: &SequenceRecord) -> Result<(), LoadError> {
        match self.length {
            Some(expected) if expected != record.len() => Err(LoadError::LengthMismatch {
                index: self.records.len() + 1,
                name: record.name.clone(),
                found: record.len(),
                expected,
            }),
            _ => Ok(()),
        }
    }

    pub fn push(&mut self, record: SequenceRecord) -> Result<(), LoadError> {
        self.check_length(&record)?;
        self.length.get_or_insert(record.len());
        self.records.push(record);
        Ok(())
    }

    /// Number of sequences (N)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Shared sequence length (L), 0 for an empty alignment
    pub fn sequence_length(&self) -> usize {
        self.length.unwrap_or(0)
    }

    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn sequence(&self, index: usize) -> &[u8] {
        &self.records[index].residues
    }
}
