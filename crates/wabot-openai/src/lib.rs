// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completions client for the Wabot agent.

pub mod client;
pub mod types;

pub use client::OpenAiClient;
