//! Speech recognition session management

mod session;

pub use session::{SessionSink, SessionStatus, SpeechInputSession};
