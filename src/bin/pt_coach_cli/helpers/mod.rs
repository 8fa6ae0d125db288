// ABOUTME: Re-exports helper modules for pt-coach
// ABOUTME: Provides stdin prompting and display formatting utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

pub mod display;
pub mod input;
