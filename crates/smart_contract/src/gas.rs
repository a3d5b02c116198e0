//! Gas metering for a single session, per spec.md §4.8: each syscall has a
//! static price in units of 10⁻³ GAS, deducted before the handler runs.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasMeter {
    consumed: i64,
    limit: i64,
}

impl GasMeter {
    pub fn new(limit: i64) -> Self {
        Self { consumed: 0, limit }
    }

    pub fn consumed(&self) -> i64 {
        self.consumed
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn remaining(&self) -> i64 {
        self.limit - self.consumed
    }

    /// Deducts `price` from the remaining budget. Fails, leaving the
    /// meter unchanged, if the budget would go negative.
    pub fn consume(&mut self, price: i64) -> Result<()> {
        let remaining = self.remaining();
        if price > remaining {
            return Err(Error::GasExhausted {
                needed: price,
                remaining,
            });
        }
        self.consumed += price;
        Ok(())
    }
}
