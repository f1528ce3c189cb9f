// File: ./src/model/mod.rs
pub mod adapter;
pub mod class;
pub mod display;
pub mod event;
pub mod item;
pub mod phrase;
pub mod session;

pub use class::{ClassInfo, ClassPlan};
pub use event::{CalendarEvent, EventKind};
pub use item::{Priority, Task};
pub use phrase::{DateMatch, ParsedInput, PhraseKind, detect_date, parse_date_from_input};
pub use session::{AttendanceStatus, MeetingPattern, SessionOccurrence, generate_sessions};
