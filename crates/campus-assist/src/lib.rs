//! Core library for the Crestview University registration assistant.
//!
//! The assistant answers applicant questions through a hybrid of a structured
//! dialog engine and a generative fallback, verifies uploaded documents
//! against the claimed student identity, and tracks per-student application
//! progress. External services (dialog engine, generative model, OCR, the
//! application store) are consumed through ports so the whole pipeline can be
//! exercised offline.

pub mod accounts;
pub mod application;
pub mod assistant;
pub mod channel;
pub mod config;
pub mod documents;
pub mod error;
pub mod telemetry;
