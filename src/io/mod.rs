//! Plain-text file I/O.
//!
//! # Supported Formats
//!
//! | Format | Load | Save | Notes |
//! |--------|------|------|-------|
//! | Ring | ✓ | ✗ | Vertex count, then `x y` pairs |
//! | Snapshot | ✗ | ✓ | Vertices and segments of a mesh stage |
//! | Timing log | ✗ | append | One `<n> <seconds>` line per run |
//!
//! # Usage
//!
//! ```no_run
//! use polydecomp::algo::{decompose, DecomposeOptions};
//! use polydecomp::io::{load_ring, save_snapshot};
//!
//! let ring = load_ring("input.txt").unwrap();
//! let result = decompose::<u32>(&ring, &DecomposeOptions::default()).unwrap();
//! save_snapshot(result.final_snapshot(), "output3.txt").unwrap();
//! ```

pub mod ring;
pub mod snapshot;

pub use ring::{load_ring, parse_ring};
pub use snapshot::{append_timing, format_snapshot, save_snapshot};
