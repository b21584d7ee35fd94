use crate::error::Result;
use crate::model::StructuralTree;
use indexmap::IndexMap;
use std::path::PathBuf;

/// Raw bytes of every file in a snapshot, keyed by the path nodes refer to.
pub type FileContents = IndexMap<PathBuf, Vec<u8>>;

/// A language front end turning one snapshot's files into a structural tree.
///
/// Implementations must produce exactly one `File` root per input file, a byte
/// accurate location for every declaration, the ordered parameter names of
/// callable nodes, and call edges resolved within the produced tree. Calls that
/// cannot be resolved are left out.
pub trait SourceCodeAnalyzer: Send + Sync {
    /// Language identifier, e.g. "javascript".
    fn name(&self) -> &str;

    /// File extensions (without the dot) this analyzer accepts.
    fn supported_extensions(&self) -> &[&str];

    fn parse(&self, files: &FileContents) -> Result<StructuralTree>;
}
