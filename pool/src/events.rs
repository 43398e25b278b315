//! Events emitted by committed pool operations.

use crate::position::PositionId;
use lpstake_types::Address;
use serde::Serialize;

/// State changes that observers can subscribe to via the [`EventBus`].
///
/// Events are emitted only after an operation has committed; rejected
/// operations emit nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PoolEvent {
    /// A new position was created.
    Staked {
        id: PositionId,
        owner: Address,
        usdc: u128,
        brbc: u128,
        whitelisted: bool,
    },
    /// A position changed hands.
    Transferred {
        id: PositionId,
        from: Address,
        to: Address,
    },
    /// The admin distributed rewards over the staked principal.
    RewardsAdded { amount: u128, reward_growth: u128 },
    /// A position's accrued reward was paid out.
    RewardsClaimed {
        id: PositionId,
        owner: Address,
        amount: u128,
    },
    /// A position entered the withdrawal queue.
    WithdrawRequested {
        id: PositionId,
        owner: Address,
        usdc: u128,
        brbc: u128,
        penalty_usdc: u128,
    },
    /// The admin funded all outstanding requests.
    RequestsFunded { usdc: u128, brbc: u128 },
    /// A position was paid out and retired.
    Withdrawn {
        id: PositionId,
        owner: Address,
        usdc: u128,
        brbc: u128,
    },
    WhitelistUpdated { added: usize, removed: usize },
    MaxPoolChanged { previous: u128, current: u128 },
}

type Listener = Box<dyn Fn(&PoolEvent) + Send + Sync>;

/// Synchronous fan-out event bus.
///
/// Listeners run inline on the thread that performed the operation, while
/// the pool is still borrowed; keep them short.
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &PoolEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn emit_reaches_every_listener() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));
        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&PoolEvent::RequestsFunded { usdc: 1, brbc: 4 });
        assert_eq!(counter.load(Ordering::SeqCst), 11);
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn emit_without_listeners_is_noop() {
        EventBus::default().emit(&PoolEvent::WhitelistUpdated {
            added: 1,
            removed: 0,
        });
    }
}
