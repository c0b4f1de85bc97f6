//! Locating optional real-data test files.
//!
//! Real ICON grids and GRIB2 forecasts are far too big to commit, so tests
//! that want them look in a few well-known places and skip when absent.

use std::path::PathBuf;

/// Fonts are looked up here as well, so figure tests can use a system font.
const SYSTEM_FONT_DIRS: [&str; 2] = [
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/TTF",
];

/// The workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .map(PathBuf::from)
        .unwrap_or(manifest_dir)
}

/// Every directory searched by [`find_test_file`], in order.
///
/// `TEST_DATA_DIR` comes first when set, then `testdata/` at the workspace
/// root, then the system font directories.
pub fn test_data_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = std::env::var_os("TEST_DATA_DIR") {
        dirs.push(PathBuf::from(dir));
    }
    dirs.push(workspace_root().join("testdata"));
    dirs.extend(SYSTEM_FONT_DIRS.iter().map(PathBuf::from));
    dirs
}

/// First existing file called `name` in [`test_data_dirs`].
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    test_data_dirs()
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|path| path.exists())
}
