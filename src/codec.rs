//! Line-oriented text format for sparse matrices
//!
//! ```text
//! rows=3
//! cols=3
//! # comment
//! (0, 0, 1)
//! (2, 1, -7)
//! ```
//!
//! `rows=`/`cols=` may appear anywhere and the last occurrence wins. Entry
//! lines may repeat a coordinate; the last occurrence wins there too. Blank
//! lines and `#` comments are ignored, anything else is malformed.

use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::matrix::{BoundsPolicy, Entries, MatrixConfig, Scalar, SparseMatrix};

/// Decoded entry mapping plus declared `(rows, cols)`
pub type Decoded<T> = (Entries<T>, (usize, usize));

/// One recognised line of the text format
enum Line<T> {
    Rows(usize),
    Cols(usize),
    Entry(usize, usize, T),
    Skip,
}

fn parse_line<T: Scalar>(line_number: usize, raw: &str) -> Result<Line<T>> {
    let line = raw.trim();
    let malformed = || Error::MalformedEntry {
        line_number,
        line: line.to_string(),
    };

    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Skip);
    }

    if let Some(count) = line.strip_prefix("rows=") {
        return count.trim().parse().map(Line::Rows).map_err(|_| malformed());
    }

    if let Some(count) = line.strip_prefix("cols=") {
        return count.trim().parse().map(Line::Cols).map_err(|_| malformed());
    }

    let inner = line
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let fields: Vec<&str> = inner.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(malformed());
    }

    let row: usize = fields[0].parse().map_err(|_| malformed())?;
    let col: usize = fields[1].parse().map_err(|_| malformed())?;
    let value: T = fields[2].parse().map_err(|_| malformed())?;

    Ok(Line::Entry(row, col, value))
}

/// Decodes the text format into an entry mapping and `(rows, cols)`
///
/// Entry indices are not checked against the declared dimensions.
pub fn decode<T: Scalar>(text: &str) -> Result<Decoded<T>> {
    let mut entries = Entries::new();
    let (mut n_rows, mut n_cols) = (0, 0);

    for (index, raw) in text.lines().enumerate() {
        match parse_line(index + 1, raw)? {
            Line::Rows(rows) => n_rows = rows,
            Line::Cols(cols) => n_cols = cols,
            Line::Entry(row, col, value) => {
                entries.insert((row, col), value);
            }
            Line::Skip => {}
        }
    }

    Ok((entries, (n_rows, n_cols)))
}

/// Decodes the text format, honouring the config's bounds policy
pub fn decode_with<T: Scalar>(text: &str, config: &MatrixConfig) -> Result<Decoded<T>> {
    let (entries, (n_rows, n_cols)) = decode(text)?;

    match config.bounds_policy {
        BoundsPolicy::Unchecked => Ok((entries, (n_rows, n_cols))),
        BoundsPolicy::Strict => {
            let matrix = SparseMatrix::try_new(n_rows, n_cols, entries)?;
            Ok(matrix.into_parts())
        }
    }
}

/// Reads a matrix file with the default config
pub fn read_matrix<T: Scalar, P: AsRef<Path>>(path: P) -> Result<SparseMatrix<T>> {
    read_matrix_with(path, &MatrixConfig::default())
}

/// Reads a matrix file
///
/// The file is read in full and closed before decoding.
pub fn read_matrix_with<T: Scalar, P: AsRef<Path>>(
    path: P,
    config: &MatrixConfig,
) -> Result<SparseMatrix<T>> {
    let path = path.as_ref();

    let mut file = File::open(path).map_err(|_| Error::SourceNotFound {
        path: path.to_path_buf(),
    })?;

    let mut text = String::new();
    file.read_to_string(&mut text).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    drop(file);

    let (entries, (n_rows, n_cols)) = decode_with(&text, config)?;
    Ok(SparseMatrix::new(n_rows, n_cols, entries))
}

/// Encodes a matrix as `rows=`, `cols=` and one line per stored entry,
/// sorted by row then column
pub fn encode<T: Scalar>(matrix: &SparseMatrix<T>) -> String {
    matrix.to_string()
}

/// Writes the encoded matrix to a file, replacing any existing content
pub fn write_matrix<T: Scalar, P: AsRef<Path>>(path: P, matrix: &SparseMatrix<T>) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(encode(matrix).as_bytes()).map_err(io_err)?;
    Ok(())
}

impl<T: Scalar> fmt::Display for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n_rows, n_cols) = self.dimensions();
        writeln!(f, "rows={}", n_rows)?;
        writeln!(f, "cols={}", n_cols)?;
        for ((row, col), value) in self.sorted_entries() {
            writeln!(f, "({}, {}, {})", row, col, value)?;
        }
        Ok(())
    }
}

impl<T: Scalar> FromStr for SparseMatrix<T> {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let (entries, (n_rows, n_cols)) = decode(text)?;
        Ok(SparseMatrix::new(n_rows, n_cols, entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic() {
        let (entries, dims) = decode::<i64>("rows=2\ncols=3\n(0, 0, 1)\n(1, 2, -5)\n").unwrap();

        assert_eq!(dims, (2, 3));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[&(0, 0)], 1);
        assert_eq!(entries[&(1, 2)], -5);
    }

    #[test]
    fn test_decode_whitespace_comments_and_blanks() {
        let text = "  # header comment\n\n  rows= 4 \ncols=4\n   (  1 ,2,   3 )   \n\t\n";
        let (entries, dims) = decode::<i64>(text).unwrap();

        assert_eq!(dims, (4, 4));
        assert_eq!(entries[&(1, 2)], 3);
    }

    #[test]
    fn test_decode_last_occurrence_wins() {
        let text = "rows=1\nrows=5\ncols=2\n(0,1,1)\ncols=7\n(0,1,9)\n";
        let (entries, dims) = decode::<i64>(text).unwrap();

        assert_eq!(dims, (5, 7));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[&(0, 1)], 9);
    }

    #[test]
    fn test_decode_missing_dimensions_default_to_zero() {
        let (entries, dims) = decode::<i64>("(0, 0, 1)\n").unwrap();
        assert_eq!(dims, (0, 0));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_decode_two_fields_is_malformed() {
        match decode::<i64>("rows=3\ncols=3\n(1,2)\n") {
            Err(Error::MalformedEntry { line_number, line }) => {
                assert_eq!(line_number, 3);
                assert_eq!(line, "(1,2)");
            }
            other => panic!("expected MalformedEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_other_lines() {
        for bad in [
            "hello",
            "(1, 2, 3, 4)",
            "(a, 2, 3)",
            "1, 2, 3",
            "(-1, 0, 3)",
            "(0, 0, 1.5)",
            "rows=abc",
            "depth=3",
        ] {
            assert!(
                matches!(decode::<i64>(bad), Err(Error::MalformedEntry { .. })),
                "line should be malformed: {}",
                bad
            );
        }
    }

    #[test]
    fn test_decode_with_strict_bounds() {
        let text = "rows=2\ncols=2\n(0,0,1)\n(2,1,4)\n";

        assert!(decode_with::<i64>(text, &MatrixConfig::default()).is_ok());

        let strict = MatrixConfig {
            bounds_policy: BoundsPolicy::Strict,
            ..MatrixConfig::default()
        };
        assert!(matches!(
            decode_with::<i64>(text, &strict),
            Err(Error::IndexOutOfBounds { row: 2, col: 1, .. })
        ));
    }

    #[test]
    fn test_encode_sorted_with_zeros() {
        let matrix = SparseMatrix::from_triplets(3, 2, vec![(2, 0, 5), (0, 1, 0), (0, 0, -1)]);

        assert_eq!(
            encode(&matrix),
            "rows=3\ncols=2\n(0, 0, -1)\n(0, 1, 0)\n(2, 0, 5)\n"
        );
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&SparseMatrix::<i64>::zeros(0, 0)), "rows=0\ncols=0\n");
    }

    #[test]
    fn test_from_str() {
        let matrix: SparseMatrix = "rows=2\ncols=2\n(1, 1, 8)".parse().unwrap();
        assert_eq!(matrix.dimensions(), (2, 2));
        assert_eq!(matrix.get(1, 1), 8);
    }
}
