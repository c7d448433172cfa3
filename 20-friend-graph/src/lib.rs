//! In-memory user service with a friendship-distance query.
//!
//! Users hold a list of friend ids; the lists form a directed graph over
//! which the service answers "how many hops from A to B". Each module has
//! one job:
//!
//! - [`model`] defines the user record and the JSON request/response shapes.
//! - [`store`] keeps the records in memory and allocates ids.
//! - [`graph`] runs the breadth-first degrees-of-separation search.
//! - [`service`] applies validation and serialises access to the store.
//! - [`error`] lists the ways a service call can fail.
//! - [`http`] maps routes onto the service and errors onto status codes.
//! - [`server`] binds the router to a listener with graceful shutdown.
//! - [`cli`] parses the command line for the `friend-graph` binary.

pub mod cli;
pub mod error;
pub mod graph;
pub mod http;
pub mod model;
pub mod server;
pub mod service;
pub mod store;
