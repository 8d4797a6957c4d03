//! Speakwise backend - English-tutoring platform services.
//!
//! Provides authentication, learning preferences, plan purchases (one-shot
//! and two-part installment), recurring subscriptions, and demo-class
//! scheduling over a PostgreSQL store and an external payment gateway.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
