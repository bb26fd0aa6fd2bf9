//! Port allocation for spawned emulator instances.
//!
//! Each allocator hands out strictly increasing ports from its base for
//! the lifetime of the process; nothing is persisted or recycled. The
//! default start path uses a process-wide shared allocator so that every
//! instance launched by one test binary gets a distinct port. Tests that
//! need a deterministic sequence can inject their own allocator through
//! [`LaunchOptions`](crate::LaunchOptions).

use std::sync::atomic::{AtomicU16, Ordering};

/// First port handed out by the shared allocator.
pub const DEFAULT_BASE_PORT: u16 = 8000;

static SHARED_ALLOCATOR: PortAllocator = PortAllocator::new(DEFAULT_BASE_PORT);

/// Monotonic port counter. Cheap to share behind an `Arc`; all mutation
/// goes through one atomic so concurrent `start` calls never collide.
#[derive(Debug)]
pub struct PortAllocator {
    next: AtomicU16,
}

impl PortAllocator {
    pub const fn new(base: u16) -> Self {
        Self {
            next: AtomicU16::new(base),
        }
    }

    /// Claim the next port. Never returns the same value twice for one
    /// allocator.
    pub fn next(&self) -> u16 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

/// The process-wide allocator backing [`DynamoDb::start`](crate::DynamoDb::start).
pub fn shared() -> &'static PortAllocator {
    &SHARED_ALLOCATOR
}
