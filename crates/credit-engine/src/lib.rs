//! Credit scoring engine: scorecards, rating scales, and policy rules that turn a
//! validated application into an auditable APPROVE/REJECT decision.

pub mod config;
pub mod error;
pub mod scoring;
pub mod sessions;
pub mod telemetry;
