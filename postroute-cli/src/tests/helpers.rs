//! Test helpers for plan CLI workspaces and stub geocoders.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use postroute_core::GeocodeResolver;
use postroute_core::test_support::MemoryResolver;
use tempfile::TempDir;

/// Write `contents` to `path`, panicking on failure.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).unwrap_or_else(|err| panic!("failed to write {path}: {err}"));
}

/// Create a temporary directory addressed by a UTF-8 path.
pub(super) fn temp_root() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Postcodes around Bournemouth; the nearest-neighbour order from BH12PE to
/// BH76HW is BH12PE, BH22BL, BH88AQ, BH76HW.
pub(super) fn bournemouth_resolver() -> MemoryResolver {
    MemoryResolver::new()
        .with_location("BH12PE", 50.7209, -1.8806)
        .with_location("BH22BL", 50.7250, -1.8900)
        .with_location("BH88AQ", 50.7400, -1.9500)
        .with_location("BH76HW", 50.7600, -2.0000)
}

/// Resolver builder that never touches the network.
#[derive(Debug, Default)]
pub(super) struct StubResolverBuilder;

impl PlanResolverBuilder for StubResolverBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn GeocodeResolver>, CliError> {
        Ok(Box::new(bournemouth_resolver()))
    }
}
