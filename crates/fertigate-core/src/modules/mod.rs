pub mod archive;
pub mod balance;
pub mod conductivity;
pub mod feedback;
pub mod pipeline;
pub mod profiles;
pub mod report;
pub mod serialization;
pub mod water;

mod traits;

pub use archive::{ArchiveOutcome, ArchiveRecord, JsonLinesArchive, MemoryArchive};
pub use balance::IonicBalancer;
pub use conductivity::{EcNormalizer, EcScaling};
pub use feedback::FeedbackAdjuster;
pub use pipeline::{RecipePipeline, calculate_drip_recipe};
pub use profiles::{BuiltinProfiles, CropProfile, JsonProfileRepository, ProfileRepositoryError};
pub use report::{RecipeReport, RecipeTable, render_warning, render_warnings};
pub use traits::{ArchivalSink, CropProfileRepository};
pub use water::WaterCompensator;
