mod route;
mod router;

pub use route::{Route, ROUTE_OPERATIONS};
pub use router::{QueryRouter, RouteRule};
