//! API Routes
//!
//! Route handlers organized by functionality.

pub mod analyze;
pub mod axis;
pub mod correlations;
pub mod health;
pub mod periods;
pub mod statistics;
pub mod transform;
