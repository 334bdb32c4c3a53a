pub mod feedback;
pub mod library;
pub mod session;
pub mod undo;

pub use feedback::{Feedback, FeedbackTone};
pub use library::{DecodedImage, MediaError, MediaLibrary};
pub use session::{DecisionOutcome, ReviewSession, SessionError, SessionState, UndoOutcome};
pub use undo::{ActionLogEntry, UndoStack, UNDO_CAPACITY};
