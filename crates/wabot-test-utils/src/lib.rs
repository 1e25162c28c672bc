// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Wabot workspace.

pub mod mock_gateway;

pub use mock_gateway::{GroupMutation, MockGateway};
