pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{default_languages, Language, RetrievalStrategy, Settings};
