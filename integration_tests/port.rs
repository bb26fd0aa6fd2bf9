use dynamodb_test::PortAllocator;

use std::sync::Arc;

// ============================================================================
// Public API tests for port allocation
// ============================================================================

/// **VALUE**: Verifies the public allocator contract: sequential calls
/// produce strictly increasing, pairwise distinct ports.
///
/// **WHY THIS MATTERS**: This is the invariant callers lean on when they
/// start several emulator instances from one test binary - no two
/// instances may ever share an address.
#[test]
fn given_injected_allocator_when_allocating_sequentially_then_strictly_increasing() {
    // GIVEN: An allocator as a caller would inject it
    let allocator = Arc::new(PortAllocator::new(31000));

    // WHEN: Allocating a run of ports
    let ports: Vec<u16> = (0..20).map(|_| allocator.next()).collect();

    // THEN: Strictly increasing, so pairwise distinct
    for pair in ports.windows(2) {
        assert!(pair[0] < pair[1], "Ports should be strictly increasing");
    }
}
