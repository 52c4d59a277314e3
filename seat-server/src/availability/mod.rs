//! Segment conflict and availability engine.
//!
//! Bookings are spans of stop positions, not time intervals. This module
//! resolves stations to ordinals on a route, decides overlap between
//! half-open ordinal segments, aggregates per-seat availability across a
//! bus, and estimates segment times by linear interpolation.

mod config;
mod engine;
mod estimate;
mod overlap;
mod report;
mod resolver;
mod segment;


pub use config::{AvailabilityConfig, UnresolvedBookingPolicy};
pub use engine::SeatAvailability;
pub use estimate::{estimate_segment_times, estimate_time_at};
pub use overlap::segments_overlap;
pub use report::{AvailabilityReport, BusSummary, RouteSummary, SeatQuery, SegmentSummary};
pub use resolver::{ordinal_of, resolve_segment};
pub use segment::{InvalidSegment, Segment};
