pub mod homework;
pub mod rebus;
pub mod schedule;
pub mod user;

pub use homework::HomeworkEntry;
pub use rebus::{Rebus, RebusTopEntry};
pub use schedule::ScheduleFile;
pub use user::UserRecord;
