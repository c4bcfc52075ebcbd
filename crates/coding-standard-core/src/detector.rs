//! Which generated paths already exist on disk

use std::path::Path;

/// Reports which candidate paths already exist under a base directory.
///
/// Candidates are relative, POSIX-style paths. A leading `/` is ignored so a
/// candidate can never escape the base directory by being absolute. Any kind
/// of filesystem entry counts as existing, directories included.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExistingFileDetector;

impl ExistingFileDetector {
    pub fn new() -> Self {
        Self
    }

    /// Existence of every candidate, in input order
    pub fn detect<'a, I>(&self, base: &Path, candidates: I) -> Vec<(String, bool)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates
            .into_iter()
            .map(|candidate| {
                let exists = base.join(candidate.trim_start_matches('/')).exists();
                (candidate.to_string(), exists)
            })
            .collect()
    }

    /// Only the candidates that exist, in input order
    pub fn existing<'a, I>(&self, base: &Path, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.detect(base, candidates)
            .into_iter()
            .filter_map(|(path, exists)| exists.then_some(path))
            .collect()
    }

    pub fn has_any_existing<'a, I>(&self, base: &Path, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.detect(base, candidates)
            .into_iter()
            .any(|(_, exists)| exists)
    }
}
