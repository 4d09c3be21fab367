//! mindmate-web: HTTP surface for MindMate
//! Provides the JSON API consumed by the web client:
//!   - health check
//!   - doctor directory and sleep tips
//!   - knowledge search
//!   - analyze / genai / selfcheck triage endpoints

pub mod router;
pub mod handlers;
pub mod state;
