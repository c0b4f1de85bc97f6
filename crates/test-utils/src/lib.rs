//! Shared test helpers for the icon-plot workspace.
//!
//! - synthetic ICON-style grids and temperature cells ([`generators`])
//! - a GRIB2 writer for unstructured-grid messages ([`grib`])
//! - small GeoJSON reference layers ([`fixtures`])
//! - lookup of optional real data files ([`paths`]) and skip macros

pub mod fixtures;
pub mod generators;
pub mod grib;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use grib::Grib2Builder;
pub use paths::*;

/// Return the path of a real-data test file, or print a skip message and
/// return from the calling test when it is not available.
///
/// ```ignore
/// let grid = require_test_file!("icon_grid_0026_R03B07_G.nc");
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: '{}' not found. Put it under testdata/ or set TEST_DATA_DIR.",
                    $name
                );
                return;
            }
        }
    }};
}

/// Assert that two numbers differ by at most `epsilon`, compared as `f64`.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left = $left as f64;
        let right = $right as f64;
        let epsilon = $epsilon as f64;
        let diff = (left - right).abs();
        assert!(
            diff <= epsilon,
            "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
            left,
            right,
            diff,
            epsilon
        );
    }};
}

/// [`assert_approx_eq!`] on both members of an `(x, y)` pair.
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($x1:expr, $y1:expr), ($x2:expr, $y2:expr), $epsilon:expr) => {{
        $crate::assert_approx_eq!($x1, $x2, $epsilon);
        $crate::assert_approx_eq!($y1, $y2, $epsilon);
    }};
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (x1, y1) = $left;
        let (x2, y2) = $right;
        $crate::assert_approx_eq!(x1, x2, $epsilon);
        $crate::assert_approx_eq!(y1, y2, $epsilon);
    }};
}
