pub mod models;
mod selector;

pub use models::{Meeting, MeetingResponse};
pub use selector::{list_meetings, select_meetings, WorkingLocationPolicy};
