//! Launching and supervising DynamoDB Local instances.
//!
//! This module provides:
//! - Spawning the emulator jar on a freshly allocated port
//! - Waiting for the port to accept TCP connections, with a deadline
//! - The [`DynamoDb`](handle::DynamoDb) handle for shutdown and address
//!   lookup

pub mod handle;
pub mod launch;
