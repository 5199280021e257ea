//! mq-cafe: a tiny café menu web app plus the tooling that stages a GitHub
//! merge-queue demo around it
//!
//! The app side ([`menu`], [`web`]) serves a static, validated menu. The
//! tooling side ([`demo`], [`runner`], [`platform`], [`git`]) opens a fixed
//! set of pull requests that merge cleanly one by one but together break the
//! menu's limits, and can reset the repository to run the demo again.

pub mod auth;
pub mod config;
pub mod demo;
pub mod error;
pub mod git;
pub mod menu;
pub mod patch;
pub mod platform;
pub mod process;
pub mod ruleset;
pub mod runner;
pub mod types;
pub mod web;
