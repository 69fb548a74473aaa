//! Reader for the Matrix Market coordinate format.
//!
//! Only real-valued coordinate matrices with `general` or `symmetric`
//! storage are accepted:
//!
//! ```text
//! %%MatrixMarket matrix coordinate real <general|symmetric>
//! % optional comment lines
//! <m> <n> <nnz>
//! <i> <j> <value>         -- repeated nnz times, 1-based indices
//! ```

#![allow(non_snake_case)]

use crate::algebra::{Axis, CooError, CooMatrix, FloatT, MatrixSymmetry, TripletStorage};
use derive_builder::Builder;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default bound on the length of a line, terminator included
pub const MAX_LINE_LENGTH: usize = 500;

/// Fields of the Matrix Market header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Banner,
    Object,
    Format,
    Field,
    Symmetry,
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeaderField::Banner => "banner",
            HeaderField::Object => "object",
            HeaderField::Format => "format",
            HeaderField::Field => "field",
            HeaderField::Symmetry => "symmetry",
        };
        write!(f, "{}", name)
    }
}

/// Error type returned by the Matrix Market reader.
///
/// Every error other than [`Io`](MatrixMarketError::Io) and the
/// missing-line variants carries the 1-based line number at fault.
#[derive(Error, Debug)]
pub enum MatrixMarketError {
    #[error("cannot read matrix market data: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot read any line in the file")]
    MissingHeader,
    #[error("line {line}: number of tokens in the header must be 5, found {found}")]
    HeaderFieldCount { line: usize, found: usize },
    #[error("line {line}: header {field} must be {expected}, found \"{found}\"")]
    BadHeaderField {
        line: usize,
        field: HeaderField,
        expected: &'static str,
        found: String,
    },
    #[error("the file has no size line (m, n, nnz)")]
    MissingSize,
    #[error("line {line}: cannot parse the dimensions (m, n, nnz)")]
    BadSize { line: usize },
    #[error("line {line}: matrix must be square, found {m} x {n}")]
    NotSquare { line: usize, m: usize, n: usize },
    #[error("line {line}: entry count {nnz} overflows the triplet capacity")]
    CapacityOverflow { line: usize, nnz: usize },
    #[error("line {line}: cannot parse the values (i, j, x)")]
    BadEntry { line: usize },
    #[error("line {line}: line exceeds the maximum length of {max} bytes")]
    LineTooLong { line: usize, max: usize },
    #[error("line {line}: line is not valid UTF-8")]
    InvalidUtf8 { line: usize },
    #[error("line {line}: {source}")]
    Storage {
        line: usize,
        #[source]
        source: CooError,
    },
}

/// Treatment of diagonal entries of `symmetric` files
///
/// A symmetric file lists the lower triangle only, and the reader
/// stores every off-diagonal entry on both sides of the diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymmetricDiagonal {
    /// store each diagonal entry once
    #[default]
    Single,
    /// store each diagonal entry twice.  Duplicates are summed by
    /// [`CscMatrix::from_coo`](crate::algebra::CscMatrix::from_coo),
    /// so the converted diagonal is doubled
    Mirror,
}

/// Settings for [`read_matrix_market`]

#[derive(Builder, Debug, Clone)]
pub struct ReaderSettings {
    /// maximum line length in bytes, line terminator included
    #[builder(default = "MAX_LINE_LENGTH")]
    pub max_line_length: usize,
    /// diagonal handling for symmetric files
    #[builder(default = "SymmetricDiagonal::Single")]
    pub diagonal_policy: SymmetricDiagonal,
}

impl Default for ReaderSettings {
    fn default() -> ReaderSettings {
        ReaderSettingsBuilder::default().build().unwrap()
    }
}

/// Number of triplets to allocate for a file declaring `nnz` entries.
///
/// Symmetric files list one triangle, so room is made for each entry
/// on both sides of the diagonal.  Returns `None` on overflow.
pub fn triplet_capacity(nnz: usize, symmetry: MatrixSymmetry) -> Option<usize> {
    match symmetry {
        MatrixSymmetry::General => Some(nnz),
        MatrixSymmetry::Symmetric => nnz.checked_mul(2),
    }
}

/// Read a Matrix Market file into a [`CooMatrix`].
pub fn read_matrix_market_file<T, P>(
    path: P,
    settings: &ReaderSettings,
) -> Result<CooMatrix<T>, MatrixMarketError>
where
    T: FloatT,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    read_matrix_market(BufReader::new(file), settings)
}

/// Parse Matrix Market text into a [`CooMatrix`].
///
/// The matrix is returned with [`TripletStorage::Full`]: symmetric
/// files have their off-diagonal entries mirrored during reading.
pub fn read_matrix_market<T, R>(
    reader: R,
    settings: &ReaderSettings,
) -> Result<CooMatrix<T>, MatrixMarketError>
where
    T: FloatT,
    R: BufRead,
{
    let mut lines = BoundedLines::new(reader, settings.max_line_length);

    let symmetry = match lines.next_line()? {
        Some((lineno, line)) => parse_header(lineno, line)?,
        None => return Err(MatrixMarketError::MissingHeader),
    };

    // comments are only allowed between the header and the size line
    let (m, capacity, size_line) = loop {
        match lines.next_line()? {
            None => return Err(MatrixMarketError::MissingSize),
            Some((_, line)) if line.starts_with('%') => continue,
            Some((lineno, line)) => {
                let (m, n, nnz) = parse_size(lineno, line)?;
                if m != n {
                    return Err(MatrixMarketError::NotSquare { line: lineno, m, n });
                }
                let capacity = triplet_capacity(nnz, symmetry)
                    .ok_or(MatrixMarketError::CapacityOverflow { line: lineno, nnz })?;
                break (m, capacity, lineno);
            }
        }
    };

    let mut coo = CooMatrix::try_new(m, capacity).map_err(|source| MatrixMarketError::Storage {
        line: size_line,
        source,
    })?;
    coo.symmetry = symmetry;
    coo.storage = TripletStorage::Full;

    let mirror_diagonal = settings.diagonal_policy == SymmetricDiagonal::Mirror;

    while let Some((lineno, line)) = lines.next_line()? {
        let (i, j, aij) = parse_entry::<T>(lineno, line)?;
        let storage_err = |source| MatrixMarketError::Storage {
            line: lineno,
            source,
        };

        let row = zero_based(i, Axis::Row, m).map_err(storage_err)?;
        let col = zero_based(j, Axis::Column, m).map_err(storage_err)?;

        coo.put(row, col, aij).map_err(storage_err)?;
        if symmetry == MatrixSymmetry::Symmetric && (row != col || mirror_diagonal) {
            coo.put(col, row, aij).map_err(storage_err)?;
        }
    }

    Ok(coo)
}

// ---------------------------------------------------------------------
// line reading and parsing
// ---------------------------------------------------------------------

// yields lines with their terminators stripped, refusing any
// line longer than `max` bytes instead of splitting it
struct BoundedLines<R> {
    reader: R,
    buf: Vec<u8>,
    lineno: usize,
    max: usize,
}

impl<R: BufRead> BoundedLines<R> {
    fn new(reader: R, max: usize) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            lineno: 0,
            max,
        }
    }

    fn next_line(&mut self) -> Result<Option<(usize, &str)>, MatrixMarketError> {
        self.buf.clear();
        let limit = (self.max as u64).saturating_add(1);
        let nread = self
            .reader
            .by_ref()
            .take(limit)
            .read_until(b'\n', &mut self.buf)?;
        if nread == 0 {
            return Ok(None);
        }
        self.lineno += 1;

        if self.buf.len() > self.max {
            return Err(MatrixMarketError::LineTooLong {
                line: self.lineno,
                max: self.max,
            });
        }

        while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
            self.buf.pop();
        }

        let line = std::str::from_utf8(&self.buf)
            .map_err(|_| MatrixMarketError::InvalidUtf8 { line: self.lineno })?;
        Ok(Some((self.lineno, line)))
    }
}

fn parse_header(lineno: usize, line: &str) -> Result<MatrixSymmetry, MatrixMarketError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 5 {
        return Err(MatrixMarketError::HeaderFieldCount {
            line: lineno,
            found: tokens.len(),
        });
    }

    let bad_field = |field: HeaderField, expected: &'static str, found: &str| MatrixMarketError::BadHeaderField {
        line: lineno,
        field,
        expected,
        found: found.to_string(),
    };

    let expected = [
        (HeaderField::Banner, "%%MatrixMarket"),
        (HeaderField::Object, "matrix"),
        (HeaderField::Format, "coordinate"),
        (HeaderField::Field, "real"),
    ];
    for ((field, literal), token) in expected.iter().zip(&tokens) {
        if *token != *literal {
            return Err(bad_field(*field, literal, token));
        }
    }

    match tokens[4] {
        "general" => Ok(MatrixSymmetry::General),
        "symmetric" => Ok(MatrixSymmetry::Symmetric),
        other => Err(bad_field(
            HeaderField::Symmetry,
            "\"general\" or \"symmetric\"",
            other,
        )),
    }
}

fn parse_size(lineno: usize, line: &str) -> Result<(usize, usize, usize), MatrixMarketError> {
    let bad = || MatrixMarketError::BadSize { line: lineno };
    let values = line
        .split_whitespace()
        .map(|tok| tok.parse::<usize>().map_err(|_| bad()))
        .collect::<Result<Vec<_>, _>>()?;

    match values[..] {
        [m, n, nnz] => Ok((m, n, nnz)),
        _ => Err(bad()),
    }
}

fn parse_entry<T: FloatT>(lineno: usize, line: &str) -> Result<(usize, usize, T), MatrixMarketError> {
    let bad = || MatrixMarketError::BadEntry { line: lineno };
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [i, j, x] = tokens[..] else {
        return Err(bad());
    };

    let i = i.parse::<usize>().map_err(|_| bad())?;
    let j = j.parse::<usize>().map_err(|_| bad())?;
    let x = x.parse::<f64>().map_err(|_| bad())?;
    let x = T::from_f64(x).ok_or_else(bad)?;
    Ok((i, j, x))
}

// 1-based file index to 0-based matrix index.  Index 0 has
// no 0-based counterpart and is reported as -1
fn zero_based(index: usize, axis: Axis, dim: usize) -> Result<usize, CooError> {
    index.checked_sub(1).ok_or(CooError::IndexOutOfRange {
        axis,
        index: -1,
        dim,
    })
}

// ---------------------------------------------------------------------
// tests
// ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<CooMatrix<f64>, MatrixMarketError> {
        read_matrix_market(text.as_bytes(), &ReaderSettings::default())
    }

    #[test]
    fn test_header_fields() {
        let cases = [
            ("%%MatrixMarkett matrix coordinate real general", HeaderField::Banner),
            ("%%MatrixMarket vector coordinate real general", HeaderField::Object),
            ("%%MatrixMarket matrix array real general", HeaderField::Format),
            ("%%MatrixMarket matrix coordinate complex general", HeaderField::Field),
            ("%%MatrixMarket matrix coordinate pattern general", HeaderField::Field),
            ("%%MatrixMarket matrix coordinate real hermitian", HeaderField::Symmetry),
            ("%%MatrixMarket matrix coordinate real General", HeaderField::Symmetry),
        ];
        for (header, expected_field) in cases {
            let text = format!("{header}\n1 1 1\n1 1 1.0\n");
            match read(&text) {
                Err(MatrixMarketError::BadHeaderField { line, field, .. }) => {
                    assert_eq!(line, 1);
                    assert_eq!(field, expected_field, "header: {header}");
                }
                other => panic!("unexpected result for {header}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_header_field_count() {
        for header in [
            "%%MatrixMarket matrix coordinate real",
            "%%MatrixMarket matrix coordinate real general extra",
            "",
        ] {
            let text = format!("{header}\n1 1 1\n1 1 1.0\n");
            assert!(matches!(
                read(&text),
                Err(MatrixMarketError::HeaderFieldCount { line: 1, .. })
            ));
        }
        assert!(matches!(read(""), Err(MatrixMarketError::MissingHeader)));
    }

    #[test]
    fn test_comments_and_missing_size() {
        let text = "%%MatrixMarket matrix coordinate real general\n% one\n%two\n";
        assert!(matches!(read(text), Err(MatrixMarketError::MissingSize)));

        let text = "%%MatrixMarket matrix coordinate real general\n% c\n2 2 1\n2 1 -0.5\n";
        let A = read(text).unwrap();
        assert_eq!(A.dim(), 2);
        assert_eq!(A.capacity(), 1);
        assert_eq!(A.triplets().collect::<Vec<_>>(), vec![(1, 0, -0.5)]);
    }

    #[test]
    fn test_bad_size_line() {
        for size in ["2 2", "2 2 x", "-2 2 1", "2 2 1 1"] {
            let text = format!("%%MatrixMarket matrix coordinate real general\n{size}\n");
            assert!(matches!(
                read(&text),
                Err(MatrixMarketError::BadSize { line: 2 })
            ));
        }

        let text = "%%MatrixMarket matrix coordinate real general\n2 3 1\n";
        assert!(matches!(
            read(text),
            Err(MatrixMarketError::NotSquare { line: 2, m: 2, n: 3 })
        ));
    }

    #[test]
    fn test_bad_entries() {
        let head = "%%MatrixMarket matrix coordinate real general\n2 2 2\n";
        for entry in ["1 1", "1 x 1.0", "1 1 abc", "-1 1 1.0", "% late comment", ""] {
            let text = format!("{head}1 1 1.0\n{entry}\n");
            assert!(matches!(
                read(&text),
                Err(MatrixMarketError::BadEntry { line: 4 })
            ));
        }
    }

    #[test]
    fn test_index_range() {
        let head = "%%MatrixMarket matrix coordinate real general\n2 2 2\n";

        match read(&format!("{head}0 1 1.0\n")) {
            Err(MatrixMarketError::Storage { line, source }) => {
                assert_eq!(line, 3);
                assert_eq!(
                    source,
                    CooError::IndexOutOfRange {
                        axis: Axis::Row,
                        index: -1,
                        dim: 2
                    }
                );
            }
            other => panic!("unexpected result: {other:?}"),
        }

        match read(&format!("{head}1 3 1.0\n")) {
            Err(MatrixMarketError::Storage { source, .. }) => {
                assert_eq!(
                    source,
                    CooError::IndexOutOfRange {
                        axis: Axis::Column,
                        index: 2,
                        dim: 2
                    }
                );
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_capacity_exceeded() {
        let text = "%%MatrixMarket matrix coordinate real general\n2 2 1\n1 1 1.0\n2 2 1.0\n";
        match read(text) {
            Err(MatrixMarketError::Storage { line, source }) => {
                assert_eq!(line, 4);
                assert_eq!(source, CooError::CapacityExceeded { capacity: 1 });
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_unallocatable_capacity() {
        let text = "%%MatrixMarket matrix coordinate real general\n1 1 9223372036854775807\n1 1 1.0\n";
        match read(text) {
            Err(MatrixMarketError::Storage { line, source }) => {
                assert_eq!(line, 2);
                assert_eq!(
                    source,
                    CooError::AllocationFailed {
                        len: 9223372036854775807
                    }
                );
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let text = "%%MatrixMarket matrix coordinate real symmetric\n%\n1 1 9223372036854775807\n";
        assert!(matches!(
            read(text),
            Err(MatrixMarketError::Storage {
                line: 3,
                source: CooError::AllocationFailed { .. }
            })
        ));
    }

    #[test]
    fn test_line_too_long() {
        let settings = ReaderSettingsBuilder::default()
            .max_line_length(32)
            .build()
            .unwrap();
        let long = format!("1 1 {}\n", "1".repeat(40));
        let text = format!("%%MatrixMarket matrix coordinate real general\n1 1 1\n{long}");

        // the header itself exceeds 32 bytes
        assert!(matches!(
            read_matrix_market::<f64, _>(text.as_bytes(), &settings),
            Err(MatrixMarketError::LineTooLong { line: 1, max: 32 })
        ));

        let text = format!("%%MatrixMarket matrix coordinate real general\n1 1 1\n{long}");
        assert!(matches!(
            read(&text),
            Ok(ref A) if A.nnz() == 1
        ));

        let long = format!("1 1 {}\n", "1".repeat(MAX_LINE_LENGTH));
        let text = format!("%%MatrixMarket matrix coordinate real general\n1 1 1\n{long}");
        assert!(matches!(
            read(&text),
            Err(MatrixMarketError::LineTooLong { line: 3, .. })
        ));
    }

    #[test]
    fn test_line_length_boundary() {
        // "1 1 2.5\n" is exactly 8 bytes
        let settings = ReaderSettingsBuilder::default()
            .max_line_length(8)
            .build()
            .unwrap();
        let mut lines = BoundedLines::new("1 1 2.5\n1 1 2.55\n".as_bytes(), settings.max_line_length);
        assert_eq!(lines.next_line().unwrap(), Some((1, "1 1 2.5")));
        assert!(matches!(
            lines.next_line(),
            Err(MatrixMarketError::LineTooLong { line: 2, max: 8 })
        ));
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let text = "%%MatrixMarket matrix coordinate real general\r\n2 2 2\r\n1 1 1.5\r\n2 2 2.5";
        let A = read(text).unwrap();
        assert_eq!(A.nzval(), &[1.5, 2.5]);
    }

    #[test]
    fn test_general() {
        let text = "%%MatrixMarket matrix coordinate real general
% a comment
3 3 4
1 1 1.0
3 1 2.0
2 3 -3.0e-1
3 3 4
";
        let A = read(text).unwrap();
        assert_eq!(A.dim(), 3);
        assert_eq!(A.symmetry, MatrixSymmetry::General);
        assert_eq!(A.storage, TripletStorage::Full);
        assert_eq!(A.capacity(), 4);
        assert_eq!(A.rowval(), &[0, 2, 1, 2]);
        assert_eq!(A.colval(), &[0, 0, 2, 2]);
        assert_eq!(A.nzval(), &[1.0, 2.0, -0.3, 4.0]);
    }

    #[test]
    fn test_symmetric_single_diagonal() {
        let text = "%%MatrixMarket matrix coordinate real symmetric
2 2 3
1 1 4.0
2 1 1.0
2 2 3.0
";
        let A = read(text).unwrap();
        assert_eq!(A.symmetry, MatrixSymmetry::Symmetric);
        assert_eq!(A.storage, TripletStorage::Full);
        assert_eq!(A.capacity(), 6);
        assert_eq!(
            A.triplets().collect::<Vec<_>>(),
            vec![(0, 0, 4.0), (1, 0, 1.0), (0, 1, 1.0), (1, 1, 3.0)]
        );
    }

    #[test]
    fn test_symmetric_mirror_diagonal() {
        let text = "%%MatrixMarket matrix coordinate real symmetric
2 2 3
1 1 4.0
2 1 1.0
2 2 3.0
";
        let settings = ReaderSettingsBuilder::default()
            .diagonal_policy(SymmetricDiagonal::Mirror)
            .build()
            .unwrap();
        let A = read_matrix_market::<f64, _>(text.as_bytes(), &settings).unwrap();
        assert_eq!(A.nnz(), 6);
        assert_eq!(A.capacity(), 6);
        assert_eq!(
            A.triplets().collect::<Vec<_>>(),
            vec![
                (0, 0, 4.0),
                (0, 0, 4.0),
                (1, 0, 1.0),
                (0, 1, 1.0),
                (1, 1, 3.0),
                (1, 1, 3.0)
            ]
        );
    }

    #[test]
    fn test_fewer_entries_than_declared() {
        let text = "%%MatrixMarket matrix coordinate real general\n3 3 5\n2 2 1.0\n";
        let A = read(text).unwrap();
        assert_eq!(A.nnz(), 1);
        assert_eq!(A.capacity(), 5);
    }

    #[test]
    fn test_triplet_capacity() {
        assert_eq!(triplet_capacity(7, MatrixSymmetry::General), Some(7));
        assert_eq!(triplet_capacity(7, MatrixSymmetry::Symmetric), Some(14));
        assert_eq!(triplet_capacity(usize::MAX, MatrixSymmetry::Symmetric), None);
    }

    #[test]
    fn test_f32_values() {
        let text = "%%MatrixMarket matrix coordinate real general\n1 1 1\n1 1 0.25\n";
        let A = read_matrix_market::<f32, _>(text.as_bytes(), &ReaderSettings::default()).unwrap();
        assert_eq!(A.nzval(), &[0.25f32]);
    }
}
