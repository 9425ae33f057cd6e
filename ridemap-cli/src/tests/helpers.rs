//! Test helpers for writing CLI inputs into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use ridemap_core::DriverOffer;
use std::fs;
use tempfile::TempDir;

pub(super) const LAGOA: &str = "-27.5521413,-48.6213535";
pub(super) const CAMPUS: &str = "-27.5962788,-48.551487";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Temporary directory addressed through a UTF-8 path.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn sample_offers() -> Vec<DriverOffer> {
    vec![
        DriverOffer {
            name: "Maria".to_owned(),
            introduction: "Motorista há 5 anos".to_owned(),
            vehicle: "Fiat Argo prata".to_owned(),
            rating: "4.9".to_owned(),
            price: "R$ 27,50".to_owned(),
        },
        DriverOffer {
            name: "João".to_owned(),
            introduction: "Conheço bem a ilha".to_owned(),
            vehicle: "VW Gol branco".to_owned(),
            rating: "4.7".to_owned(),
            price: "R$ 25,00".to_owned(),
        },
    ]
}

pub(super) fn write_offers(path: &Utf8Path, offers: &[DriverOffer]) {
    let payload = serde_json::to_string_pretty(offers).expect("serialise offers");
    write_utf8(path, payload.as_bytes());
}
