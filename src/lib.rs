//! payops - auxiliary tooling around a hosted checkout integration.
//!
//! Three one-shot commands, all synchronous and single-threaded:
//! - `report`: read the evolution log JSON and write a markdown usage summary
//! - `launch`: spawn the checkout backend and relay shutdown signals to it
//! - `probe`: send a manual create-checkout-session request and dump the response

pub mod config;
pub mod launch;
pub mod probe;
pub mod report;
