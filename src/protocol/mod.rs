//! Message envelopes exchanged between host and bridge

mod inbound;
mod outbound;
mod range;

pub use inbound::{InboundKind, InboundMessage};
pub use outbound::{OutboundMessage, TelemetryEntries};
pub use range::EditRange;
