pub mod constants;
pub mod ions;
pub mod settings;

pub use ions::{Ion, Polarity, Species};
pub use settings::{RecipeSettings, RecipeSettingsError, load_recipe_settings};
