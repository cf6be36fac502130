//! Events emitted by ledger operations for subscribers.

use granary_types::AccountAddress;

/// Ledger-level events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerEvent {
    /// A deposit was recorded.
    Staked { account: AccountAddress, amount: u128 },
    /// An account's open positions were frozen into a pending claim.
    ClaimApplied {
        account: AccountAddress,
        principal: u128,
        reward: u128,
    },
    /// A pending claim settled and paid out.
    Claimed {
        account: AccountAddress,
        principal: u128,
        reward: u128,
    },
    /// The parameter-setting capability changed hands (`new: None` after a
    /// renunciation).
    OwnershipTransferred {
        previous: Option<AccountAddress>,
        new: Option<AccountAddress>,
    },
}

/// Synchronous fan-out event bus for ledger events.
///
/// Listeners are invoked inline on the emitting thread; keep handlers fast
/// to avoid stalling ledger operations.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&LedgerEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LedgerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
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
    use std::sync::{Arc, Mutex};

    fn addr(n: u8) -> AccountAddress {
        AccountAddress::new(format!("gry_{:0>60}", n))
    }

    #[test]
    fn emit_reaches_every_listener() {
        let mut bus = EventBus::new();
        let seen_a: Arc<Mutex<Vec<LedgerEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_b: Arc<Mutex<Vec<LedgerEvent>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = seen_a.clone();
        bus.subscribe(Box::new(move |e| sink.lock().unwrap().push(e.clone())));
        let sink = seen_b.clone();
        bus.subscribe(Box::new(move |e| sink.lock().unwrap().push(e.clone())));

        bus.emit(&LedgerEvent::Staked {
            account: addr(1),
            amount: 100,
        });

        assert_eq!(seen_a.lock().unwrap().len(), 1);
        assert_eq!(seen_b.lock().unwrap().len(), 1);
    }

    #[test]
    fn emit_without_listeners_is_a_noop() {
        let bus = EventBus::new();
        bus.emit(&LedgerEvent::OwnershipTransferred {
            previous: Some(addr(1)),
            new: None,
        });
    }
}
