//! `bidwise-tendering`
//!
//! **Responsibility:** Snapshot records of the tendering domain.
//!
//! The scoring engine consumes these as **read-only inputs**:
//! - It must not mutate them.
//! - Persistence, HTTP and authentication around them are external
//!   collaborators; this crate only validates shape and carries data.
//!
//! Derived scores travel back through [`Bid::apply_scores`], invoked by the
//! caller that owns persistence, never by the engine itself.

pub mod bid;
pub mod tender;
pub mod vendor;

pub use bid::{Bid, BidScores};
pub use tender::Tender;
pub use vendor::Vendor;
