//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the gating decision and metadata reads so route
//! handlers can stay focused on protocol translation.

pub mod build_info;
pub mod guard;
pub mod session;
