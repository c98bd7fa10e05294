pub mod actions;
pub mod driver;
pub mod error;
pub mod history;
pub mod logging;
pub mod prefs;
pub mod state;

pub use actions::{dispatch, EditorAction};
pub use driver::{EditorDriver, EditorSnapshot};
pub use error::AppError;
pub use logging::init_logging;
