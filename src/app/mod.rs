// Application layer - Use case interactors

pub mod container;
pub mod editor_interactor;
pub mod export_interactor;
pub mod media_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer, Ports};
pub use editor_interactor::{EditorInteractor, EditorSession};
pub use export_interactor::{ExportInteractor, ExportOutcome};
pub use media_interactor::MediaInteractor;
