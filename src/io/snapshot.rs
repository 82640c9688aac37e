//! Snapshot text format and the timing log.
//!
//! A snapshot file has a header line `n1 n2`, then `n1` vertex lines `x y`,
//! then `n2` segment lines `x1 y1 x2 y2`. Boundary edges come first, then
//! the retained diagonals.

use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::mesh::Snapshot;

/// Render a snapshot in the segment text format.
///
/// # Example
///
/// ```
/// use polydecomp::io::format_snapshot;
/// use polydecomp::mesh::build_from_ring;
/// use nalgebra::Point2;
///
/// let ring = vec![Point2::new(0.0, 0.0), Point2::new(0.0, 1.0), Point2::new(1.0, 0.0)];
/// let mesh = build_from_ring::<u32>(&ring).unwrap();
/// let text = format_snapshot(&mesh.snapshot());
/// assert!(text.starts_with("3 3\n0 0\n"));
/// ```
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        "{} {}",
        snapshot.vertices.len(),
        snapshot.segments.len()
    );
    for p in &snapshot.vertices {
        let _ = writeln!(out, "{} {}", p.x, p.y);
    }
    for [a, b] in &snapshot.segments {
        let _ = writeln!(out, "{} {} {} {}", a.x, a.y, b.x, b.y);
    }
    out
}

/// Write a snapshot to a file, replacing any existing content.
pub fn save_snapshot<P: AsRef<Path>>(snapshot: &Snapshot, path: P) -> Result<()> {
    fs::write(path, format_snapshot(snapshot))?;
    Ok(())
}

/// Append a `<polygon size> <seconds>` line to a timing log.
pub fn append_timing<P: AsRef<Path>>(path: P, polygon_size: usize, elapsed: Duration) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{} {}", polygon_size, elapsed.as_secs_f64())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_ring, HalfEdgeMesh, VertexId};
    use nalgebra::Point2;

    fn square() -> HalfEdgeMesh {
        build_from_ring(&[
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 2.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_format_boundary() {
        let text = format_snapshot(&square().snapshot());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "4 4");
        assert_eq!(&lines[1..5], &["0 0", "0 2", "2 2", "2 0"]);
        assert_eq!(lines[5], "0 0 0 2");
        assert_eq!(lines[8], "2 0 0 0");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_format_lists_diagonals_last() {
        let mut mesh = square();
        mesh.connect(VertexId::new(0), VertexId::new(2)).unwrap();
        let text = format_snapshot(&mesh.snapshot());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "4 5");
        assert_eq!(lines.last(), Some(&"2 2 0 0"));
    }

    #[test]
    fn test_fractional_coordinates() {
        let mesh: HalfEdgeMesh = build_from_ring(&[
            Point2::new(0.5, -1.25),
            Point2::new(0.0, 3.0),
            Point2::new(2.0, 0.0),
        ])
        .unwrap();
        let text = format_snapshot(&mesh.snapshot());
        assert!(text.lines().any(|l| l == "0.5 -1.25"));
    }

    #[test]
    fn test_save_and_append() {
        let dir = std::env::temp_dir().join("polydecomp_io_test");
        fs::create_dir_all(&dir).unwrap();

        let out = dir.join("output1.txt");
        save_snapshot(&square().snapshot(), &out).unwrap();
        assert!(fs::read_to_string(&out).unwrap().starts_with("4 4\n"));

        let log = dir.join("analysis.txt");
        let _ = fs::remove_file(&log);
        append_timing(&log, 4, Duration::from_millis(250)).unwrap();
        append_timing(&log, 6, Duration::from_millis(500)).unwrap();
        assert_eq!(fs::read_to_string(&log).unwrap(), "4 0.25\n6 0.5\n");

        fs::remove_dir_all(&dir).unwrap();
    }
}
