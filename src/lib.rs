//! # abiquo-api - hypermedia REST client for the Abiquo API
//!
//! Every resource returned by the API carries a set of typed links, and
//! collections are paginated through a `next` link instead of offset
//! parameters. This crate provides the machinery that makes that usable
//! without hand-written link chasing in every call.
//!
//! ## Features
//!
//! - Basic and OAuth1 (HMAC-SHA1) authentication
//! - Link following by relation name on any resource
//! - Transparent pagination that drains every page into one `Vec`, keeping
//!   the items already fetched when a later page fails
//! - One error type for both server error shapes: the JSON error envelope
//!   and plain text bodies
//! - Streamed multipart uploads authorized by a login session token
//! - Optional TLS verification bypass and request/response logging through
//!   `tracing`
//! - Deadlines and cancellation checked before every request
//!
//! ## Basic Usage
//!
//! ```no_run
//! use abiquo_api::{AbiquoClient, Config};
//! use std::collections::HashMap;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new("https://abiquo.example.com/api").with_debug(true);
//!     let client = AbiquoClient::basic(config, "admin", "xabiquo")?;
//!
//!     let user = client.login()?;
//!     println!("Logged in as {}", user.nick);
//!
//!     let mut filters = HashMap::new();
//!     filters.insert("severity".to_string(), "ERROR".to_string());
//!     for event in client.get_events(&filters)? {
//!         println!("{} {}", event.timestamp, event.action_performed);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## OAuth1
//!
//! ```no_run
//! use abiquo_api::{AbiquoClient, Config, OAuth1Credentials};
//!
//! let credentials = OAuth1Credentials::new("app-key", "app-secret", "token", "token-secret");
//! let client = AbiquoClient::oauth(Config::new("https://abiquo.example.com/api"), credentials)?;
//! # Ok::<(), abiquo_api::AbiquoError>(())
//! ```
//!
//! ## Following links
//!
//! ```no_run
//! use abiquo_api::{AbiquoClient, Config, Dto};
//! use abiquo_api::resources::VirtualMachine;
//!
//! # fn run(client: &AbiquoClient, vm: &VirtualMachine) -> abiquo_api::Result<()> {
//! if vm.has_link("edit") {
//!     let fresh: VirtualMachine = client.follow_link_as(vm, "edit")?;
//!     println!("{} is {}", fresh.name, fresh.state);
//! }
//!
//! match vm.get_disks(client) {
//!     Ok(disks) => println!("{} disks", disks.len()),
//!     Err(e) => println!("got {} disks before failing: {}", e.partial.len(), e.error),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod cancel;
pub mod client;
pub mod collection;
pub mod error;
pub mod link;
pub mod oauth1;
pub mod resources;
pub mod response;
pub mod rest;
pub mod upload;

// Re-export main types for convenience
pub use auth::Auth;
pub use cancel::CancelToken;
pub use client::Config;
pub use collection::{AbstractCollection, Collection, Page};
pub use error::{AbiquoError, PaginationError, Result};
pub use link::{Dto, Link, Links};
pub use oauth1::OAuth1Credentials;
pub use response::{normalize, ApiResponse, ErrorCollection, ErrorEnvelope};
pub use rest::{require_link, AbiquoClient};
pub use upload::TOKEN_HEADER;
