use super::archive::{ArchiveOutcome, ArchiveRecord};
use super::profiles::CropProfile;

/// Source of named crop presets, consulted before a pipeline run.
pub trait CropProfileRepository {
    fn profile(&self, name: &str) -> Option<CropProfile>;

    fn names(&self) -> Vec<String>;
}

/// Destination for completed runs. Implementations report failures through
/// the returned outcome instead of an error, so archival can never undo or
/// interrupt a computed recipe.
pub trait ArchivalSink {
    fn archive(&self, record: &ArchiveRecord) -> ArchiveOutcome;
}

impl<T> ArchivalSink for &T
where
    T: ArchivalSink + ?Sized,
{
    fn archive(&self, record: &ArchiveRecord) -> ArchiveOutcome {
        (**self).archive(record)
    }
}
