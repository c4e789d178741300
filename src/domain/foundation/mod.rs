//! Foundation value objects shared across the domain.

mod calendar;
mod ids;
mod timestamp;

pub use calendar::CalendarDate;
pub use ids::UserId;
pub use timestamp::Timestamp;
