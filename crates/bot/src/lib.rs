//! Upgrade bot library.
//!
//! A Slack bot that lets anyone request that a guest account be upgraded
//! to a full member, routes the request to an approval channel, and
//! applies a reviewer's decision via the privileged membership-change
//! endpoint.
//!
//! # Security
//!
//! The executor holds a HIGH PRIVILEGE browser session credential that
//! can change any member's account tier. Deploy accordingly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod slack;
pub mod state;
pub mod upgrade;
pub mod workflow;
