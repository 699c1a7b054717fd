//! Route prober
//!
//! Discovers which of several candidate paths serves a resource as JSON.

mod prober;
mod routes;

pub use prober::{probe_group, probe_routes, GroupReport, ProbeResult};
pub use routes::{default_groups, RouteGroup};
