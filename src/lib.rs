//! Patient Intake - Conversational clinic registration
//!
//! A receptionist dialogue driven by a hosted language model collects a
//! fixed set of registration fields, then extracts them from the transcript
//! into a structured record for review.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
