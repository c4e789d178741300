//! Karma Core - Balance and entitlement core for the Karma readings bot
//!
//! This crate implements the prepaid credit ledger, daily free entitlement,
//! and charge/refund orchestration behind the bot's paid readings. Message
//! transport and persistence engines live behind ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
