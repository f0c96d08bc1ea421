//! World plumbing: errors, options, the presentation seam and the
//! effect context

mod context;
mod errors;
mod options;
mod presenter;

pub use context::{EffectContext, Scene};
pub use errors::EngineError;
pub use options::EngineOptions;
pub use presenter::{Color, NullPresenter, Presenter, PresenterEvent, RecordingPresenter};
