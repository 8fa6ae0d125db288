// ABOUTME: Core types and constants for the PT Coach assessment wizard
// ABOUTME: Foundation crate with error handling, domain models, and checklists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

#![deny(unsafe_code)]

//! # PT Coach Core
//!
//! Foundation crate providing shared types and constants for the PT Coach
//! wizard. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AnalysisError`
//! - **constants**: Safety thresholds, checklists, and user-facing messages
//! - **models**: Profile, movement, exercise, and session record types

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;
