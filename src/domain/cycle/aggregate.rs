//! SavingsGroupCycle aggregate - one run of a savings group.
//!
//! A cycle is created Initiated, activated into Active once the group starts
//! meeting, and closed at share-out. Funds hang off the cycle and may only be
//! configured while it is Initiated.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::foundation::{
    Currency, CycleId, CycleStatus, DepositsPaymentStrategy, DomainError, GroupId, ShareProductId,
};

use super::{CycleChanges, CycleUpdate, NewCycleTerms};

/// The SavingsGroupCycle aggregate root.
#[derive(Debug, Clone)]
pub struct SavingsGroupCycle {
    id: CycleId,
    group_id: GroupId,
    cycle_number: u32,
    status: CycleStatus,
    currency: Currency,
    expected_start_date: NaiveDate,
    actual_start_date: Option<NaiveDate>,
    expected_end_date: NaiveDate,
    actual_end_date: Option<NaiveDate>,
    expected_num_of_meetings: u32,
    num_of_meetings_completed: u32,
    num_of_meetings_pending: u32,
    is_share_based: bool,
    unit_price_of_share: Decimal,
    share_product_id: Option<ShareProductId>,
    is_client_additions_allowed_in_active_cycle: bool,
    is_client_exit_allowed_in_active_cycle: bool,
    does_individual_client_exit_forfeit_gains: bool,
    deposits_payment_strategy: DepositsPaymentStrategy,
}

impl SavingsGroupCycle {
    /// Creates a new cycle in Initiated status.
    ///
    /// A non-share-based cycle always carries a unit share price of 1, no
    /// matter what the request supplied.
    pub fn new(
        group_id: GroupId,
        cycle_number: u32,
        terms: NewCycleTerms,
        expected_num_of_meetings: u32,
    ) -> Self {
        let unit_price_of_share = if terms.is_share_based {
            terms.unit_price_of_share
        } else {
            Decimal::ONE
        };

        Self {
            id: CycleId::new(),
            group_id,
            cycle_number,
            status: CycleStatus::Initiated,
            currency: terms.currency,
            expected_start_date: terms.start_date,
            actual_start_date: None,
            expected_end_date: terms.end_date,
            actual_end_date: None,
            expected_num_of_meetings,
            num_of_meetings_completed: 0,
            num_of_meetings_pending: expected_num_of_meetings,
            is_share_based: terms.is_share_based,
            unit_price_of_share,
            share_product_id: None,
            is_client_additions_allowed_in_active_cycle: terms
                .is_client_additions_allowed_in_active_cycle,
            is_client_exit_allowed_in_active_cycle: terms.is_client_exit_allowed_in_active_cycle,
            does_individual_client_exit_forfeit_gains: terms
                .does_individual_client_exit_forfeit_gains,
            deposits_payment_strategy: terms.deposits_payment_strategy,
        }
    }

    /// Reconstitutes a cycle from persisted data.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CycleId,
        group_id: GroupId,
        cycle_number: u32,
        status: CycleStatus,
        currency: Currency,
        expected_start_date: NaiveDate,
        actual_start_date: Option<NaiveDate>,
        expected_end_date: NaiveDate,
        actual_end_date: Option<NaiveDate>,
        expected_num_of_meetings: u32,
        num_of_meetings_completed: u32,
        num_of_meetings_pending: u32,
        is_share_based: bool,
        unit_price_of_share: Decimal,
        share_product_id: Option<ShareProductId>,
        is_client_additions_allowed_in_active_cycle: bool,
        is_client_exit_allowed_in_active_cycle: bool,
        does_individual_client_exit_forfeit_gains: bool,
        deposits_payment_strategy: DepositsPaymentStrategy,
    ) -> Self {
        Self {
            id,
            group_id,
            cycle_number,
            status,
            currency,
            expected_start_date,
            actual_start_date,
            expected_end_date,
            actual_end_date,
            expected_num_of_meetings,
            num_of_meetings_completed,
            num_of_meetings_pending,
            is_share_based,
            unit_price_of_share,
            share_product_id,
            is_client_additions_allowed_in_active_cycle,
            is_client_exit_allowed_in_active_cycle,
            does_individual_client_exit_forfeit_gains,
            deposits_payment_strategy,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> CycleId {
        self.id
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn cycle_number(&self) -> u32 {
        self.cycle_number
    }

    pub fn status(&self) -> CycleStatus {
        self.status
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn expected_start_date(&self) -> NaiveDate {
        self.expected_start_date
    }

    pub fn actual_start_date(&self) -> Option<NaiveDate> {
        self.actual_start_date
    }

    pub fn expected_end_date(&self) -> NaiveDate {
        self.expected_end_date
    }

    pub fn actual_end_date(&self) -> Option<NaiveDate> {
        self.actual_end_date
    }

    /// Effective start date: actual once activated, expected before that.
    pub fn start_date(&self) -> NaiveDate {
        self.actual_start_date.unwrap_or(self.expected_start_date)
    }

    /// Effective end date: actual once closed, expected before that.
    pub fn end_date(&self) -> NaiveDate {
        self.actual_end_date.unwrap_or(self.expected_end_date)
    }

    pub fn expected_num_of_meetings(&self) -> u32 {
        self.expected_num_of_meetings
    }

    pub fn num_of_meetings_completed(&self) -> u32 {
        self.num_of_meetings_completed
    }

    pub fn num_of_meetings_pending(&self) -> u32 {
        self.num_of_meetings_pending
    }

    pub fn is_share_based(&self) -> bool {
        self.is_share_based
    }

    pub fn unit_price_of_share(&self) -> Decimal {
        self.unit_price_of_share
    }

    pub fn share_product_id(&self) -> Option<ShareProductId> {
        self.share_product_id
    }

    pub fn is_client_additions_allowed_in_active_cycle(&self) -> bool {
        self.is_client_additions_allowed_in_active_cycle
    }

    pub fn is_client_exit_allowed_in_active_cycle(&self) -> bool {
        self.is_client_exit_allowed_in_active_cycle
    }

    pub fn does_individual_client_exit_forfeit_gains(&self) -> bool {
        self.does_individual_client_exit_forfeit_gains
    }

    pub fn deposits_payment_strategy(&self) -> DepositsPaymentStrategy {
        self.deposits_payment_strategy
    }

    // ───────────────────────────────────────────────────────────────
    // State transitions
    // ───────────────────────────────────────────────────────────────

    /// Activates the cycle on the given meeting date.
    pub fn activate(&mut self, start_date: NaiveDate) -> Result<CycleChanges, DomainError> {
        self.validate_transition(CycleStatus::Active)?;

        self.actual_start_date = Some(start_date);
        self.status = CycleStatus::Active;

        Ok(CycleChanges {
            actual_start_date: Some(start_date),
            status: Some(CycleStatus::Active),
            ..Default::default()
        })
    }

    /// Closes the cycle at share-out on the given end date.
    pub fn close(&mut self, end_date: NaiveDate) -> Result<CycleChanges, DomainError> {
        self.validate_transition(CycleStatus::Closed)?;

        self.actual_end_date = Some(end_date);
        self.status = CycleStatus::Closed;

        Ok(CycleChanges {
            actual_end_date: Some(end_date),
            status: Some(CycleStatus::Closed),
            ..Default::default()
        })
    }

    /// Applies an update to an Initiated cycle. Only fields that actually
    /// change land in the returned change-set.
    ///
    /// `expected_num_of_meetings` carries the recomputed meeting count when
    /// the caller moved either cycle date.
    pub fn apply_update(
        &mut self,
        update: CycleUpdate,
        expected_num_of_meetings: Option<u32>,
    ) -> Result<CycleChanges, DomainError> {
        if !self.status.is_mutable() {
            return Err(DomainError::invalid_state(
                "cycle.invalid.request.based.on.status",
                format!("Cycle cannot be updated while {}", self.status),
            ));
        }

        let mut changes = CycleChanges::default();

        // Currency sub-fields are replaced as a unit when any of them moved.
        let new_code = update
            .currency_code
            .unwrap_or_else(|| self.currency.code().to_string());
        let new_digits = update.currency_digits.unwrap_or(self.currency.digits());
        let new_multiples = match update.currency_multiples_of {
            Some(m) => Some(m),
            None => self.currency.in_multiples_of(),
        };
        let new_currency = Currency::reconstitute(new_code, new_digits, new_multiples);
        if new_currency != self.currency {
            self.currency = new_currency.clone();
            changes.currency = Some(new_currency);
        }

        if let Some(start) = update.start_date {
            if start != self.expected_start_date {
                self.expected_start_date = start;
                changes.expected_start_date = Some(start);
            }
        }
        if let Some(end) = update.end_date {
            if end != self.expected_end_date {
                self.expected_end_date = end;
                changes.expected_end_date = Some(end);
            }
        }

        if let Some(share_based) = update.is_share_based {
            if share_based != self.is_share_based {
                self.is_share_based = share_based;
                changes.is_share_based = Some(share_based);
            }
        }
        if self.is_share_based {
            if let Some(price) = update.unit_price_of_share {
                if price != self.unit_price_of_share {
                    self.unit_price_of_share = price;
                    changes.unit_price_of_share = Some(price);
                }
            }
        } else if self.unit_price_of_share != Decimal::ONE {
            // Unit price is pinned to 1 for non-share-based cycles.
            self.unit_price_of_share = Decimal::ONE;
            changes.unit_price_of_share = Some(Decimal::ONE);
        }

        if let Some(allowed) = update.is_client_additions_allowed_in_active_cycle {
            if allowed != self.is_client_additions_allowed_in_active_cycle {
                self.is_client_additions_allowed_in_active_cycle = allowed;
                changes.is_client_additions_allowed_in_active_cycle = Some(allowed);
            }
        }
        if let Some(allowed) = update.is_client_exit_allowed_in_active_cycle {
            if allowed != self.is_client_exit_allowed_in_active_cycle {
                self.is_client_exit_allowed_in_active_cycle = allowed;
                changes.is_client_exit_allowed_in_active_cycle = Some(allowed);
            }
        }
        if let Some(forfeits) = update.does_individual_client_exit_forfeit_gains {
            if forfeits != self.does_individual_client_exit_forfeit_gains {
                self.does_individual_client_exit_forfeit_gains = forfeits;
                changes.does_individual_client_exit_forfeit_gains = Some(forfeits);
            }
        }

        if let Some(strategy) = update.deposits_payment_strategy {
            if strategy != self.deposits_payment_strategy {
                self.deposits_payment_strategy = strategy;
                changes.deposits_payment_strategy = Some(strategy);
            }
        }

        if let Some(meetings) = expected_num_of_meetings {
            if meetings != self.expected_num_of_meetings {
                self.expected_num_of_meetings = meetings;
                self.num_of_meetings_pending =
                    meetings.saturating_sub(self.num_of_meetings_completed);
                changes.expected_num_of_meetings = Some(meetings);
            }
        }

        Ok(changes)
    }

    fn validate_transition(&self, target: CycleStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&target) {
            return Err(DomainError::invalid_state(
                "cycle.invalid.request.based.on.status",
                format!("Cycle cannot move from {} to {}", self.status, target),
            ));
        }
        Ok(())
    }
}
