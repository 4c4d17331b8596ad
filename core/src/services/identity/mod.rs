//! Identity resolution: the request gate behind the HTTP middleware
//!
//! A request moves through token extraction, token validation, identity
//! load and, for administrative routes, the role check. The strict entry
//! point rejects at the first failing gate; the optional one turns every
//! failure into "no identity".

mod service;


pub use service::{load_document, IdentityResolver, IdentityService};
