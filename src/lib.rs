//! Sherpa Shell - session and route-guard controller for the mobile app shell
//!
//! Owns the signed-in session, sequences startup until both the identity
//! provider and the shell have settled, keeps the visible screen consistent
//! with authentication state, and makes sure every user has a profile row.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
