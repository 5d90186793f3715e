//! Fund charge definitions.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::foundation::{ChargeAppliesTo, ChargeCalculation, ChargeId, ChargeTime};

/// A fully-validated definition for a charge being added to a fund.
#[derive(Debug, Clone)]
pub struct NewChargeDef {
    pub applies_to: ChargeAppliesTo,
    pub time: ChargeTime,
    pub calculation: ChargeCalculation,
    pub amount: Decimal,
    pub is_penalty: bool,
    pub is_active: bool,
}

/// A charge attached to a fund. The code combination is validated before
/// construction; inactive charges stay on the fund for history but are never
/// copied into a new cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct FundCharge {
    id: ChargeId,
    applies_to: ChargeAppliesTo,
    time: ChargeTime,
    calculation: ChargeCalculation,
    amount: Decimal,
    is_penalty: bool,
    is_active: bool,
}

impl FundCharge {
    pub fn new(def: NewChargeDef) -> Self {
        Self {
            id: ChargeId::new(),
            applies_to: def.applies_to,
            time: def.time,
            calculation: def.calculation,
            amount: def.amount,
            is_penalty: def.is_penalty,
            is_active: def.is_active,
        }
    }

    pub fn reconstitute(
        id: ChargeId,
        applies_to: ChargeAppliesTo,
        time: ChargeTime,
        calculation: ChargeCalculation,
        amount: Decimal,
        is_penalty: bool,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            applies_to,
            time,
            calculation,
            amount,
            is_penalty,
            is_active,
        }
    }

    pub fn id(&self) -> ChargeId {
        self.id
    }

    pub fn applies_to(&self) -> ChargeAppliesTo {
        self.applies_to
    }

    pub fn time(&self) -> ChargeTime {
        self.time
    }

    pub fn calculation(&self) -> ChargeCalculation {
        self.calculation
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn is_penalty(&self) -> bool {
        self.is_penalty
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Applies a patch to an existing charge. Only amount and active status
    /// may change after creation. Returns None when nothing moved.
    pub fn patch(
        &mut self,
        amount: Option<Decimal>,
        active: Option<bool>,
    ) -> Option<ChargeChange> {
        let mut change = ChargeChange {
            id: self.id,
            amount: None,
            active: None,
        };
        if let Some(amount) = amount {
            if amount != self.amount {
                self.amount = amount;
                change.amount = Some(amount);
            }
        }
        if let Some(active) = active {
            if active != self.is_active {
                self.is_active = active;
                change.active = Some(active);
            }
        }
        if change.amount.is_none() && change.active.is_none() {
            None
        } else {
            Some(change)
        }
    }

    /// Clones this charge for a fund copied into a new cycle.
    pub fn copy(&self) -> FundCharge {
        FundCharge {
            id: ChargeId::new(),
            ..self.clone()
        }
    }
}

/// Recorded modification of one charge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeChange {
    pub id: ChargeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
