use std::collections::HashMap;
use std::path::{Path as FsPath, PathBuf};

use cmt_error::CmtError;

use crate::{Digest, Structure};

/// A description of a value binding as recorded by the compiler.
/// Only present to round out the collaborator type's shape; the core
/// does not consume its fields (only the pair's presence in
/// `CmtInfo::value_dependencies` matters to the real compiler, not to
/// this analyzer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDescription {
    pub name: String,
}

/// The CMT file's top-level annotation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annots {
    Implementation(Structure),
    Interface,
    Packed,
    PartialImplementation,
    PartialInterface,
}

/// The structures decoded from one `.cmt` file. Only `modname`,
/// `annots` (when `Implementation`), `sourcefile`, `imports`, and
/// `interface_digest` are consumed downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmtInfo {
    pub modname: String,
    pub annots: Annots,
    pub value_dependencies: Vec<(ValueDescription, ValueDescription)>,
    pub sourcefile: Option<String>,
    pub imports: Vec<(String, Option<Digest>)>,
    pub interface_digest: Option<Digest>,
}

/// The CMT binary-layout decoder, a collaborator boundary: this core
/// treats the on-disk format as opaque and only depends on this trait.
/// The real decoder (out of scope) would read
/// the compiler's binary format; [`MockCmtDecoder`] below is the
/// in-memory stand-in used for tests and for any embedder that
/// already has `CmtInfo` values in hand.
pub trait CmtDecoder: Send + Sync {
    fn decode(&self, cmt_path: &FsPath) -> Result<CmtInfo, CmtError>;
}

/// A deterministic, in-memory [`CmtDecoder`] driven by a map from CMT
/// path to a pre-built [`CmtInfo`]. Paths not present in the map
/// decode as an error, matching the "unreadable CMT" case the
/// extractor must recover from.
#[derive(Debug, Default, Clone)]
pub struct MockCmtDecoder {
    entries: HashMap<PathBuf, CmtInfo>,
}

impl MockCmtDecoder {
    pub fn new() -> Self {
        MockCmtDecoder {
            entries: HashMap::new(),
        }
    }

    pub fn with_entry(mut self, path: impl Into<PathBuf>, info: CmtInfo) -> Self {
        self.entries.insert(path.into(), info);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, info: CmtInfo) {
        self.entries.insert(path.into(), info);
    }
}

impl CmtDecoder for MockCmtDecoder {
    fn decode(&self, cmt_path: &FsPath) -> Result<CmtInfo, CmtError> {
        self.entries.get(cmt_path).cloned().ok_or_else(|| {
            CmtError::decode(cmt_path, "no fixture registered for this CMT path")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Structure;

    #[test]
    fn mock_decoder_returns_registered_entry() {
        let info = CmtInfo {
            modname: "Utils".into(),
            annots: Annots::Implementation(Structure::default()),
            value_dependencies: Vec::new(),
            sourcefile: Some("Utils.res".into()),
            imports: Vec::new(),
            interface_digest: None,
        };
        let decoder = MockCmtDecoder::new().with_entry("Utils.cmt", info.clone());
        let decoded = decoder.decode(FsPath::new("Utils.cmt")).unwrap();
        assert_eq!(decoded, info);
    }

    #[test]
    fn mock_decoder_errors_on_unknown_path() {
        let decoder = MockCmtDecoder::new();
        assert!(decoder.decode(FsPath::new("Missing.cmt")).is_err());
    }
}
