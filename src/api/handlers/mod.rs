//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod gatherings;
pub mod health;
pub mod invitations;
pub mod members;
