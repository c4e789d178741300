//! Reading domain - the catalogue of priced actions.

mod charge;
mod kind;

pub use charge::{ChargeBasis, ChargeRequest};
pub use kind::{ReadingKind, TopicReading};
