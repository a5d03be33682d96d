//! # srp-esi
//!
//! EVE Swagger Interface access for the SRP fit checker:
//! - the [`Resolver`] trait the name cache talks to
//! - [`EsiClient`], its HTTP implementation (`/universe/ids/`,
//!   `/universe/types/{id}/`, `/corporations/{id}/`, `/alliances/{id}/`)
//! - killmail fetching and killmail link parsing
//!
//! Every call is a single request with the configured timeout. Nothing is
//! retried and nothing is cached here.

mod client;
mod error;
mod http;
mod link;
mod resolver;

pub use client::EsiClient;
pub use error::ResolverError;
pub use link::parse_killmail_link;
pub use resolver::Resolver;
