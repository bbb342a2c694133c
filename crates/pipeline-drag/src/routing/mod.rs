//! Connector re-routing
//!
//! [`policy`] decides the geometry of a single connector. [`ConnectorRouter`]
//! writes it into the document and runs the cascade after a node moves.

pub mod policy;
mod router;

pub use policy::{route, Approach, ArrowPlacement, Route, Segment, StartEdge};
pub use router::{ConnectorRouter, RerouteReport, SkippedConnector};
