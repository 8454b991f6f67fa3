//! Veterinary clinic backend library modules.
//!
//! Layout follows a hexagonal split: `domain` holds entities and port
//! traits, `inbound` adapts HTTP requests onto the domain, `outbound`
//! implements the ports (SQLite persistence, SMTP delivery, PDF
//! rendering), and `server` wires everything together.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;
