use serde::{Deserialize, Deserializer, Serializer};
use std::path::Path;
use std::sync::Arc;

pub mod serde_arc_path {
    use super::*;

    pub fn serialize<S>(arc: &Arc<Path>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&arc.to_string_lossy())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Arc<Path>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Arc::from(Path::new(&s)))
    }
}

/// Number of the line (1-based) containing `offset`.
pub fn line_at(source: &[u8], offset: usize) -> usize {
    let end = offset.min(source.len());
    source[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
