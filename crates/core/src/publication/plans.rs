//! Fixed publication plans.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::Serialize;

use fesa_shared::types::Money;

/// A (duration, cost) pair selectable at publication time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Identifier sent by clients, e.g. `7days`.
    pub id: &'static str,
    /// Number of days the ad stays visible.
    pub days: i64,
    /// Price in whole currency units.
    pub cost_units: i64,
}

/// Plan used when the caller names none or an unknown one.
pub const DEFAULT_PLAN_ID: &str = "7days";

/// All plans, shortest and cheapest first.
pub const PLANS: [Plan; 3] = [
    Plan {
        id: "7days",
        days: 7,
        cost_units: 500,
    },
    Plan {
        id: "30days",
        days: 30,
        cost_units: 1500,
    },
    Plan {
        id: "90days",
        days: 90,
        cost_units: 4000,
    },
];

impl Plan {
    /// Resolves a plan identifier, falling back to the shortest plan.
    #[must_use]
    pub fn lookup(id: Option<&str>) -> &'static Self {
        id.and_then(|id| PLANS.iter().find(|plan| plan.id == id))
            .unwrap_or(&PLANS[0])
    }

    /// Price of the plan.
    #[must_use]
    pub fn cost(&self) -> Money {
        Money::new(Decimal::from(self.cost_units))
    }

    /// How long an ad published on this plan stays visible.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::days(self.days)
    }
}
