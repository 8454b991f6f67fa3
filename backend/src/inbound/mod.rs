//! Inbound adapters translating external protocols onto the domain.

pub mod http;
