//! Venue gateway: normalized order submission, HTTP client, wire types.

mod gateway;
mod paper;
mod types;
mod venue_client;

pub use gateway::{ExchangeGateway, OrderKind, OrderOutcome, OrderTicket};
pub use paper::PaperGateway;
pub use venue_client::{VenueClient, MAINNET_URL, TESTNET_URL};
