//! Player resources
//!
//! The combat code never touches balances directly; it goes through these
//! traits so the host can swap in its own bookkeeping.

use serde::{Deserialize, Serialize};

/// Money the player spends on towers and earns from popped layers.
///
/// There is no overdraft protection here. Callers check `balance()` before
/// withdrawing.
pub trait Currency {
    fn deposit(&mut self, amount: u32);
    fn withdraw(&mut self, amount: u32);
    fn balance(&self) -> i64;

    fn can_afford(&self, cost: u32) -> bool {
        self.balance() >= i64::from(cost)
    }
}

/// Life points lost when balloons reach the end of their path
pub trait LifeCounter {
    fn decrease(&mut self, amount: u32);
    fn remaining(&self) -> i32;
}

/// The player's bank account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    balance: i64,
}

impl Bank {
    pub fn new(initial_balance: u32) -> Self {
        Self {
            balance: i64::from(initial_balance),
        }
    }
}

impl Currency for Bank {
    fn deposit(&mut self, amount: u32) {
        self.balance += i64::from(amount);
    }

    fn withdraw(&mut self, amount: u32) {
        self.balance -= i64::from(amount);
    }

    fn balance(&self) -> i64 {
        self.balance
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifePoints {
    value: i32,
}

impl LifePoints {
    pub fn new(value: i32) -> Self {
        Self { value }
    }

    pub fn is_depleted(&self) -> bool {
        self.value <= 0
    }
}

impl Default for LifePoints {
    fn default() -> Self {
        Self::new(crate::consts::STARTING_LIVES)
    }
}

impl LifeCounter for LifePoints {
    fn decrease(&mut self, amount: u32) {
        self.value = self.value.saturating_sub_unsigned(amount);
    }

    fn remaining(&self) -> i32 {
        self.value
    }
}
