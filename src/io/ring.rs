//! Polygon ring text format.
//!
//! A ring file starts with the vertex count `n`, followed by `n` pairs of
//! `x y` coordinates. Tokens are separated by arbitrary whitespace, so the
//! usual one-vertex-per-line layout is not required:
//!
//! ```text
//! 6
//! 0 0
//! 4 0
//! 4 2
//! 2 2
//! 2 4
//! 0 4
//! ```

use std::fs;
use std::path::Path;

use nalgebra::Point2;

use crate::error::{MeshError, Result};

/// Whitespace tokens tagged with their 1-based line number.
struct Tokens<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    current: Option<(usize, std::str::SplitWhitespace<'a>)>,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            current: None,
            last_line: 1,
        }
    }

    fn next_token(&mut self) -> Option<(usize, &'a str)> {
        loop {
            if let Some((line, words)) = self.current.as_mut() {
                if let Some(word) = words.next() {
                    return Some((*line, word));
                }
            }
            let (i, line) = self.lines.next()?;
            self.last_line = i + 1;
            self.current = Some((i + 1, line.split_whitespace()));
        }
    }

    fn parse_next<T: std::str::FromStr>(&mut self, what: &str) -> Result<T> {
        match self.next_token() {
            Some((line, word)) => word.parse().map_err(|_| MeshError::Parse {
                line,
                message: format!("expected {}, found {:?}", what, word),
            }),
            None => Err(MeshError::Parse {
                line: self.last_line,
                message: format!("unexpected end of input, expected {}", what),
            }),
        }
    }
}

/// Parse a ring from text.
///
/// Tokens after the last declared vertex are ignored.
///
/// # Example
///
/// ```
/// use polydecomp::io::parse_ring;
///
/// let ring = parse_ring("3\n0 0\n1 0\n0 1\n").unwrap();
/// assert_eq!(ring.len(), 3);
/// ```
pub fn parse_ring(text: &str) -> Result<Vec<Point2<f64>>> {
    let mut tokens = Tokens::new(text);
    let n: usize = tokens.parse_next("vertex count")?;

    // The count is untrusted; every vertex needs at least two tokens
    let mut points = Vec::with_capacity(n.min(text.len() / 2));
    for _ in 0..n {
        let x: f64 = tokens.parse_next("x coordinate")?;
        let y: f64 = tokens.parse_next("y coordinate")?;
        points.push(Point2::new(x, y));
    }
    Ok(points)
}

/// Load a ring from a file.
pub fn load_ring<P: AsRef<Path>>(path: P) -> Result<Vec<Point2<f64>>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    parse_ring(&text).map_err(|e| match e {
        MeshError::Parse { line, message } => MeshError::LoadError {
            path: path.to_path_buf(),
            message: format!("line {}: {}", line, message),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_l_shape() {
        let text = "6\n0 0\n4 0\n4 2\n2 2\n2 4\n0 4\n";
        let ring = parse_ring(text).unwrap();
        assert_eq!(ring.len(), 6);
        assert_eq!(ring[2], Point2::new(4.0, 2.0));
        assert_eq!(ring[5], Point2::new(0.0, 4.0));
    }

    #[test]
    fn test_parse_free_layout() {
        let ring = parse_ring("  3 0.5 -1\t2e1 0\n\n 1 1 trailing").unwrap();
        assert_eq!(
            ring,
            vec![
                Point2::new(0.5, -1.0),
                Point2::new(20.0, 0.0),
                Point2::new(1.0, 1.0)
            ]
        );
    }

    #[test]
    fn test_parse_reports_line() {
        let err = parse_ring("3\n0 0\n1 x\n").unwrap_err();
        match err {
            MeshError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("y coordinate"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_truncated() {
        assert!(matches!(
            parse_ring("4\n0 0\n1 0\n"),
            Err(MeshError::Parse { line: 3, .. })
        ));
        assert!(matches!(parse_ring(""), Err(MeshError::Parse { .. })));
    }

    #[test]
    fn test_parse_bad_count() {
        assert!(matches!(
            parse_ring("-2\n"),
            Err(MeshError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("polydecomp_missing_ring.txt");
        let _ = fs::remove_file(&path);
        assert!(matches!(load_ring(&path), Err(MeshError::Io(_))));
    }

    #[test]
    fn test_load_reports_path() {
        let path = std::env::temp_dir().join("polydecomp_bad_ring.txt");
        fs::write(&path, "2\n0 0\n").unwrap();
        let err = load_ring(&path).unwrap_err();
        assert!(matches!(err, MeshError::LoadError { .. }));
        assert!(err.to_string().contains("line"));
        fs::remove_file(&path).unwrap();
    }
}
