//! Request validation for fund commands.
//!
//! Two update modes exist: while the owning cycle is Initiated the full
//! schema is editable; once the cycle is Active only the name, the interest
//! rate, and existing-charge patches may change.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::foundation::{
    AmortizationMethod, ChargeAppliesTo, ChargeCalculation, ChargeId, ChargeTime, DomainError,
    InterestCalculationPeriod, InterestMethod, ParamError, RepaymentFrequency, StrategyId,
};

use super::changes::LoanLimit;
use super::charge::NewChargeDef;
use super::loan_product_detail::NewLoanProductTerms;

pub const MAX_FUND_NAME_LEN: usize = 50;

/// Wire payload for fund create and update requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FundPayload {
    pub locale: Option<String>,
    pub date_format: Option<String>,
    pub name: Option<String>,
    pub minimum_deposit_per_meeting: Option<Decimal>,
    pub maximum_deposit_per_meeting: Option<Decimal>,
    pub is_loan_limit_based_on_savings: Option<bool>,
    pub loan_limit_amount: Option<Decimal>,
    pub loan_limit_factor: Option<i64>,
    pub annual_nominal_interest_rate: Option<Decimal>,
    pub interest_method_id: Option<i32>,
    pub interest_calculated_in_period_id: Option<i32>,
    pub repay_every: Option<i64>,
    pub repayment_period_frequency_id: Option<i32>,
    pub number_of_repayments: Option<i64>,
    pub min_number_of_repayments: Option<i64>,
    pub max_number_of_repayments: Option<i64>,
    pub amortization_method_id: Option<i32>,
    pub transaction_processing_strategy_id: Option<StrategyId>,
    pub charges: Option<Vec<ChargePayload>>,
}

/// Wire payload for one charge entry. Entries without an id define a new
/// charge; entries with an id patch an existing one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChargePayload {
    pub locale: Option<String>,
    pub id: Option<ChargeId>,
    pub charge_applies_to_id: Option<i32>,
    pub charge_time_id: Option<i32>,
    pub charge_calculation_id: Option<i32>,
    pub amount: Option<Decimal>,
    pub penalty: Option<bool>,
    pub active: Option<bool>,
}

/// Fully-validated terms for a new fund.
#[derive(Debug, Clone)]
pub struct NewFundTerms {
    pub name: String,
    pub minimum_deposit_per_meeting: Decimal,
    pub maximum_deposit_per_meeting: Decimal,
    pub loan_limit: LoanLimit,
    pub loan_product: NewLoanProductTerms,
    pub charges: Vec<NewChargeDef>,
}

/// A validated patch of an existing charge.
#[derive(Debug, Clone)]
pub struct ChargePatch {
    pub id: ChargeId,
    pub amount: Option<Decimal>,
    pub active: Option<bool>,
}

/// Validated field updates for a fund.
#[derive(Debug, Clone, Default)]
pub struct FundUpdate {
    pub name: Option<String>,
    pub minimum_deposit_per_meeting: Option<Decimal>,
    pub maximum_deposit_per_meeting: Option<Decimal>,
    pub loan_limit: Option<LoanLimit>,
    pub annual_nominal_interest_rate: Option<Decimal>,
    pub interest_method: Option<InterestMethod>,
    pub interest_calculated_in_period: Option<InterestCalculationPeriod>,
    pub repay_every: Option<u32>,
    pub repayment_frequency: Option<RepaymentFrequency>,
    pub number_of_repayments: Option<u32>,
    pub min_number_of_repayments: Option<u32>,
    pub max_number_of_repayments: Option<u32>,
    pub amortization_method: Option<AmortizationMethod>,
    pub transaction_processing_strategy_id: Option<StrategyId>,
    pub charge_patches: Vec<ChargePatch>,
    pub new_charges: Vec<NewChargeDef>,
}

/// Validates a fund creation payload.
pub fn validate_new_fund(payload: &FundPayload) -> Result<NewFundTerms, DomainError> {
    let mut errors: Vec<ParamError> = Vec::new();

    let name = check_name_required(payload.name.as_deref(), &mut errors);

    let min_deposit = check_positive_required(
        payload.minimum_deposit_per_meeting,
        "minimumDepositPerMeeting",
        &mut errors,
    );
    let max_deposit = check_positive_required(
        payload.maximum_deposit_per_meeting,
        "maximumDepositPerMeeting",
        &mut errors,
    );
    if let (Some(min), Some(max)) = (min_deposit, max_deposit) {
        if max < min {
            errors.push(ParamError::new(
                "maximumDepositPerMeeting",
                "maximumDepositPerMeeting cannot be less than minimumDepositPerMeeting",
            ));
        }
    }

    let loan_limit = check_loan_limit_required(payload, &mut errors);

    let rate = check_positive_required(
        payload.annual_nominal_interest_rate,
        "annualNominalInterestRate",
        &mut errors,
    );
    let interest_method = check_code_required(
        payload.interest_method_id,
        "interestMethodId",
        InterestMethod::from_code,
        "interestMethodId must be 0 or 1",
        &mut errors,
    );
    let interest_period = check_code_required(
        payload.interest_calculated_in_period_id,
        "interestCalculatedInPeriodId",
        InterestCalculationPeriod::from_code,
        "interestCalculatedInPeriodId must be 0 or 1",
        &mut errors,
    );
    let repay_every = check_greater_than_zero_required(payload.repay_every, "repayEvery", &mut errors);
    let repayment_frequency = check_code_required(
        payload.repayment_period_frequency_id,
        "repaymentPeriodFrequencyId",
        RepaymentFrequency::from_code,
        "repaymentPeriodFrequencyId must be between 0 and 3",
        &mut errors,
    );
    let repayments = check_number_of_repayments(payload, true, &mut errors);
    let amortization = check_code_required(
        payload.amortization_method_id,
        "amortizationMethodId",
        AmortizationMethod::from_code,
        "amortizationMethodId must be 0 or 1",
        &mut errors,
    );
    let strategy_id = match payload.transaction_processing_strategy_id {
        Some(id) => Some(id),
        None => {
            errors.push(ParamError::new(
                "transactionProcessingStrategyId",
                "transactionProcessingStrategyId is required",
            ));
            None
        }
    };

    let charges = check_new_charges(payload.charges.as_deref(), &mut errors);

    let terms = (|| {
        let (number, min_n, max_n) = repayments?;
        Some(NewFundTerms {
            name: name?,
            minimum_deposit_per_meeting: min_deposit?,
            maximum_deposit_per_meeting: max_deposit?,
            loan_limit: loan_limit?,
            loan_product: NewLoanProductTerms {
                annual_nominal_interest_rate: rate?,
                interest_method: interest_method?,
                interest_calculated_in_period: interest_period?,
                repay_every: repay_every?,
                repayment_frequency: repayment_frequency?,
                number_of_repayments: number,
                min_number_of_repayments: min_n,
                max_number_of_repayments: max_n,
                amortization_method: amortization?,
                transaction_processing_strategy_id: strategy_id?,
            },
            charges: charges?,
        })
    })();

    match terms {
        Some(terms) if errors.is_empty() => Ok(terms),
        _ => Err(DomainError::validation(errors)),
    }
}

/// Validates a fund update while the owning cycle is Initiated. The full
/// schema applies, each rule only when the parameter is present.
pub fn validate_fund_update_initiated(payload: &FundPayload) -> Result<FundUpdate, DomainError> {
    let mut errors: Vec<ParamError> = Vec::new();
    let mut update = FundUpdate::default();

    if let Some(name) = payload.name.as_deref() {
        update.name = check_name(name, &mut errors);
    }
    if let Some(min) = payload.minimum_deposit_per_meeting {
        update.minimum_deposit_per_meeting =
            check_positive(min, "minimumDepositPerMeeting", &mut errors);
    }
    if let Some(max) = payload.maximum_deposit_per_meeting {
        update.maximum_deposit_per_meeting =
            check_positive(max, "maximumDepositPerMeeting", &mut errors);
    }
    if let (Some(min), Some(max)) = (
        update.minimum_deposit_per_meeting,
        update.maximum_deposit_per_meeting,
    ) {
        if max < min {
            errors.push(ParamError::new(
                "maximumDepositPerMeeting",
                "maximumDepositPerMeeting cannot be less than minimumDepositPerMeeting",
            ));
        }
    }

    if payload.is_loan_limit_based_on_savings.is_some() {
        update.loan_limit = check_loan_limit_required(payload, &mut errors);
    } else if payload.loan_limit_factor.is_some() || payload.loan_limit_amount.is_some() {
        errors.push(ParamError::new(
            "isLoanLimitBasedOnSavings",
            "isLoanLimitBasedOnSavings is required when a loan limit is supplied",
        ));
    }

    if let Some(rate) = payload.annual_nominal_interest_rate {
        update.annual_nominal_interest_rate =
            check_positive(rate, "annualNominalInterestRate", &mut errors);
    }
    if let Some(code) = payload.interest_method_id {
        update.interest_method = check_code(
            code,
            "interestMethodId",
            InterestMethod::from_code,
            "interestMethodId must be 0 or 1",
            &mut errors,
        );
    }
    if let Some(code) = payload.interest_calculated_in_period_id {
        update.interest_calculated_in_period = check_code(
            code,
            "interestCalculatedInPeriodId",
            InterestCalculationPeriod::from_code,
            "interestCalculatedInPeriodId must be 0 or 1",
            &mut errors,
        );
    }
    if let Some(repay_every) = payload.repay_every {
        update.repay_every = check_greater_than_zero(repay_every, "repayEvery", &mut errors);
    }
    if let Some(code) = payload.repayment_period_frequency_id {
        update.repayment_frequency = check_code(
            code,
            "repaymentPeriodFrequencyId",
            RepaymentFrequency::from_code,
            "repaymentPeriodFrequencyId must be between 0 and 3",
            &mut errors,
        );
    }
    if payload.number_of_repayments.is_some()
        || payload.min_number_of_repayments.is_some()
        || payload.max_number_of_repayments.is_some()
    {
        if let Some((number, min_n, max_n)) =
            check_number_of_repayments(payload, payload.number_of_repayments.is_some(), &mut errors)
        {
            update.number_of_repayments = Some(number);
            update.min_number_of_repayments = min_n;
            update.max_number_of_repayments = max_n;
        } else {
            update.min_number_of_repayments = to_u32_opt(payload.min_number_of_repayments);
            update.max_number_of_repayments = to_u32_opt(payload.max_number_of_repayments);
        }
    }
    if let Some(code) = payload.amortization_method_id {
        update.amortization_method = check_code(
            code,
            "amortizationMethodId",
            AmortizationMethod::from_code,
            "amortizationMethodId must be 0 or 1",
            &mut errors,
        );
    }
    update.transaction_processing_strategy_id = payload.transaction_processing_strategy_id;

    if let Some(charges) = payload.charges.as_deref() {
        if charges.is_empty() {
            errors.push(ParamError::new("charges", "charges cannot be empty"));
        }
        for (index, entry) in charges.iter().enumerate() {
            if entry.id.is_some() {
                if let Some(patch) = check_charge_patch(entry, index, &mut errors) {
                    update.charge_patches.push(patch);
                }
            } else if let Some(def) = check_new_charge(entry, index, &mut errors) {
                update.new_charges.push(def);
            }
        }
    }

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(DomainError::validation(errors))
    }
}

/// Validates a fund update while the owning cycle is Active. Only the name,
/// the annual nominal interest rate, and existing-charge patches may change.
pub fn validate_fund_update_active(payload: &FundPayload) -> Result<FundUpdate, DomainError> {
    let mut errors: Vec<ParamError> = Vec::new();
    let mut update = FundUpdate::default();

    reject_unsupported(payload, &mut errors);

    if let Some(name) = payload.name.as_deref() {
        update.name = check_name(name, &mut errors);
    }
    if let Some(rate) = payload.annual_nominal_interest_rate {
        update.annual_nominal_interest_rate =
            check_positive(rate, "annualNominalInterestRate", &mut errors);
    }
    if let Some(charges) = payload.charges.as_deref() {
        if charges.is_empty() {
            errors.push(ParamError::new("charges", "charges cannot be empty"));
        }
        for (index, entry) in charges.iter().enumerate() {
            if entry.id.is_none() {
                errors.push(ParamError::new(
                    indexed("id", index),
                    "charges can only reference existing charges while the cycle is active",
                ));
                continue;
            }
            if let Some(patch) = check_charge_patch(entry, index, &mut errors) {
                update.charge_patches.push(patch);
            }
        }
    }

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(DomainError::validation(errors))
    }
}

// ───────────────────────────────────────────────────────────────
// Field checks
// ───────────────────────────────────────────────────────────────

fn check_name_required(name: Option<&str>, errors: &mut Vec<ParamError>) -> Option<String> {
    match name {
        Some(name) => check_name(name, errors),
        None => {
            errors.push(ParamError::new("name", "name is required"));
            None
        }
    }
}

fn check_name(name: &str, errors: &mut Vec<ParamError>) -> Option<String> {
    if name.trim().is_empty() {
        errors.push(ParamError::new("name", "name cannot be blank"));
        None
    } else if name.len() > MAX_FUND_NAME_LEN {
        errors.push(ParamError::new(
            "name",
            format!("name cannot exceed {} characters", MAX_FUND_NAME_LEN),
        ));
        None
    } else {
        Some(name.to_string())
    }
}

fn check_positive_required(
    value: Option<Decimal>,
    parameter: &str,
    errors: &mut Vec<ParamError>,
) -> Option<Decimal> {
    match value {
        Some(value) => check_positive(value, parameter, errors),
        None => {
            errors.push(ParamError::new(
                parameter,
                format!("{} is required", parameter),
            ));
            None
        }
    }
}

fn check_positive(
    value: Decimal,
    parameter: &str,
    errors: &mut Vec<ParamError>,
) -> Option<Decimal> {
    if value > Decimal::ZERO {
        Some(value)
    } else {
        errors.push(ParamError::new(
            parameter,
            format!("{} must be a positive amount", parameter),
        ));
        None
    }
}

fn check_greater_than_zero_required(
    value: Option<i64>,
    parameter: &str,
    errors: &mut Vec<ParamError>,
) -> Option<u32> {
    match value {
        Some(value) => check_greater_than_zero(value, parameter, errors),
        None => {
            errors.push(ParamError::new(
                parameter,
                format!("{} is required", parameter),
            ));
            None
        }
    }
}

fn check_greater_than_zero(
    value: i64,
    parameter: &str,
    errors: &mut Vec<ParamError>,
) -> Option<u32> {
    if value > 0 && value <= i64::from(u32::MAX) {
        Some(value as u32)
    } else {
        errors.push(ParamError::new(
            parameter,
            format!("{} must be an integer greater than zero", parameter),
        ));
        None
    }
}

fn check_code_required<T>(
    code: Option<i32>,
    parameter: &str,
    from_code: impl Fn(i32) -> Result<T, DomainError>,
    message: &str,
    errors: &mut Vec<ParamError>,
) -> Option<T> {
    match code {
        Some(code) => check_code(code, parameter, from_code, message, errors),
        None => {
            errors.push(ParamError::new(
                parameter,
                format!("{} is required", parameter),
            ));
            None
        }
    }
}

fn check_code<T>(
    code: i32,
    parameter: &str,
    from_code: impl Fn(i32) -> Result<T, DomainError>,
    message: &str,
    errors: &mut Vec<ParamError>,
) -> Option<T> {
    match from_code(code) {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(ParamError::new(parameter, message));
            None
        }
    }
}

fn check_loan_limit_required(
    payload: &FundPayload,
    errors: &mut Vec<ParamError>,
) -> Option<LoanLimit> {
    match payload.is_loan_limit_based_on_savings {
        Some(true) => {
            if payload.loan_limit_amount.is_some() {
                errors.push(ParamError::new(
                    "loanLimitAmount",
                    "loanLimitAmount is not supported when the loan limit is based on savings",
                ));
                return None;
            }
            match payload.loan_limit_factor {
                Some(factor) if factor > 0 && factor <= i64::from(u32::MAX) => {
                    Some(LoanLimit::BasedOnSavings {
                        factor: factor as u32,
                    })
                }
                Some(_) => {
                    errors.push(ParamError::new(
                        "loanLimitFactor",
                        "loanLimitFactor must be an integer greater than zero",
                    ));
                    None
                }
                None => {
                    errors.push(ParamError::new(
                        "loanLimitFactor",
                        "loanLimitFactor is required when the loan limit is based on savings",
                    ));
                    None
                }
            }
        }
        Some(false) => {
            if payload.loan_limit_factor.is_some() {
                errors.push(ParamError::new(
                    "loanLimitFactor",
                    "loanLimitFactor is not supported when the loan limit is a fixed amount",
                ));
                return None;
            }
            match payload.loan_limit_amount {
                Some(amount) if amount > Decimal::ZERO => {
                    Some(LoanLimit::FixedAmount { amount })
                }
                Some(_) => {
                    errors.push(ParamError::new(
                        "loanLimitAmount",
                        "loanLimitAmount must be a positive amount",
                    ));
                    None
                }
                None => {
                    errors.push(ParamError::new(
                        "loanLimitAmount",
                        "loanLimitAmount is required when the loan limit is a fixed amount",
                    ));
                    None
                }
            }
        }
        None => {
            errors.push(ParamError::new(
                "isLoanLimitBasedOnSavings",
                "isLoanLimitBasedOnSavings is required",
            ));
            None
        }
    }
}

type RepaymentBounds = (u32, Option<u32>, Option<u32>);

fn check_number_of_repayments(
    payload: &FundPayload,
    number_required: bool,
    errors: &mut Vec<ParamError>,
) -> Option<RepaymentBounds> {
    let number = match payload.number_of_repayments {
        Some(n) => check_greater_than_zero(n, "numberOfRepayments", errors),
        None if number_required => {
            errors.push(ParamError::new(
                "numberOfRepayments",
                "numberOfRepayments is required",
            ));
            None
        }
        None => None,
    };
    let min = match payload.min_number_of_repayments {
        Some(n) => check_greater_than_zero(n, "minNumberOfRepayments", errors),
        None => None,
    };
    let max = match payload.max_number_of_repayments {
        Some(n) => check_greater_than_zero(n, "maxNumberOfRepayments", errors),
        None => None,
    };

    if let (Some(min), Some(max)) = (min, max) {
        if max < min {
            errors.push(ParamError::new(
                "maxNumberOfRepayments",
                "maxNumberOfRepayments cannot be less than minNumberOfRepayments",
            ));
        }
    }
    let number = number?;
    match (min, max) {
        (Some(min), Some(max)) if min <= max && (number < min || number > max) => {
            errors.push(ParamError::new(
                "numberOfRepayments",
                format!(
                    "numberOfRepayments must be between {} and {}",
                    min, max
                ),
            ));
            None
        }
        (None, Some(max)) if number > max => {
            errors.push(ParamError::new(
                "numberOfRepayments",
                format!("numberOfRepayments cannot exceed {}", max),
            ));
            None
        }
        (Some(min), None) if number < min => {
            errors.push(ParamError::new(
                "numberOfRepayments",
                format!("numberOfRepayments cannot be less than {}", min),
            ));
            None
        }
        _ => Some((number, min, max)),
    }
}

fn check_new_charges(
    charges: Option<&[ChargePayload]>,
    errors: &mut Vec<ParamError>,
) -> Option<Vec<NewChargeDef>> {
    let Some(charges) = charges else {
        return Some(Vec::new());
    };
    if charges.is_empty() {
        errors.push(ParamError::new("charges", "charges cannot be empty"));
        return None;
    }
    let mut defs = Vec::with_capacity(charges.len());
    let mut all_valid = true;
    for (index, entry) in charges.iter().enumerate() {
        if entry.id.is_some() {
            errors.push(ParamError::new(
                indexed("id", index),
                "charges cannot reference existing charges on fund creation",
            ));
            all_valid = false;
            continue;
        }
        match check_new_charge(entry, index, errors) {
            Some(def) => defs.push(def),
            None => all_valid = false,
        }
    }
    all_valid.then_some(defs)
}

fn check_new_charge(
    entry: &ChargePayload,
    index: usize,
    errors: &mut Vec<ParamError>,
) -> Option<NewChargeDef> {
    let before = errors.len();

    let applies_to = match entry.charge_applies_to_id {
        Some(code) => match ChargeAppliesTo::from_code(code) {
            Ok(applies_to) => Some(applies_to),
            Err(_) => {
                errors.push(ParamError::new(
                    indexed("chargeAppliesToId", index),
                    "chargeAppliesToId must be 1 or 101",
                ));
                None
            }
        },
        None => {
            errors.push(ParamError::new(
                indexed("chargeAppliesToId", index),
                "chargeAppliesToId is required",
            ));
            None
        }
    };

    let time = match entry.charge_time_id {
        Some(code) => ChargeTime::from_code(code).ok(),
        None => None,
    };
    let calculation = match entry.charge_calculation_id {
        Some(code) => ChargeCalculation::from_code(code).ok(),
        None => None,
    };

    if let Some(applies_to) = applies_to {
        match time {
            Some(time) if applies_to.allows_time(time) => {}
            _ => errors.push(ParamError::new(
                indexed("chargeTimeId", index),
                "chargeTimeId is not valid for the given chargeAppliesToId",
            )),
        }
        match calculation {
            Some(calculation) if applies_to.allows_calculation(calculation) => {}
            _ => errors.push(ParamError::new(
                indexed("chargeCalculationId", index),
                "chargeCalculationId is not valid for the given chargeAppliesToId",
            )),
        }
    }

    let amount = match entry.amount {
        Some(amount) if amount > Decimal::ZERO => Some(amount),
        Some(_) => {
            errors.push(ParamError::new(
                indexed("amount", index),
                "amount must be a positive amount",
            ));
            None
        }
        None => {
            errors.push(ParamError::new(
                indexed("amount", index),
                "amount is required",
            ));
            None
        }
    };

    if errors.len() > before {
        return None;
    }
    Some(NewChargeDef {
        applies_to: applies_to?,
        time: time?,
        calculation: calculation?,
        amount: amount?,
        is_penalty: entry.penalty.unwrap_or(false),
        is_active: entry.active.unwrap_or(true),
    })
}

fn check_charge_patch(
    entry: &ChargePayload,
    index: usize,
    errors: &mut Vec<ParamError>,
) -> Option<ChargePatch> {
    let before = errors.len();

    for (parameter, present) in [
        ("chargeAppliesToId", entry.charge_applies_to_id.is_some()),
        ("chargeTimeId", entry.charge_time_id.is_some()),
        ("chargeCalculationId", entry.charge_calculation_id.is_some()),
        ("penalty", entry.penalty.is_some()),
    ] {
        if present {
            errors.push(ParamError::new(
                indexed(parameter, index),
                format!("{} cannot be changed on an existing charge", parameter),
            ));
        }
    }

    let amount = match entry.amount {
        Some(amount) => check_positive(amount, &indexed("amount", index), errors),
        None => None,
    };

    if errors.len() > before {
        return None;
    }
    Some(ChargePatch {
        id: entry.id?,
        amount,
        active: entry.active,
    })
}

fn reject_unsupported(payload: &FundPayload, errors: &mut Vec<ParamError>) {
    for (parameter, present) in [
        (
            "minimumDepositPerMeeting",
            payload.minimum_deposit_per_meeting.is_some(),
        ),
        (
            "maximumDepositPerMeeting",
            payload.maximum_deposit_per_meeting.is_some(),
        ),
        (
            "isLoanLimitBasedOnSavings",
            payload.is_loan_limit_based_on_savings.is_some(),
        ),
        ("loanLimitAmount", payload.loan_limit_amount.is_some()),
        ("loanLimitFactor", payload.loan_limit_factor.is_some()),
        ("interestMethodId", payload.interest_method_id.is_some()),
        (
            "interestCalculatedInPeriodId",
            payload.interest_calculated_in_period_id.is_some(),
        ),
        ("repayEvery", payload.repay_every.is_some()),
        (
            "repaymentPeriodFrequencyId",
            payload.repayment_period_frequency_id.is_some(),
        ),
        (
            "numberOfRepayments",
            payload.number_of_repayments.is_some(),
        ),
        (
            "minNumberOfRepayments",
            payload.min_number_of_repayments.is_some(),
        ),
        (
            "maxNumberOfRepayments",
            payload.max_number_of_repayments.is_some(),
        ),
        (
            "amortizationMethodId",
            payload.amortization_method_id.is_some(),
        ),
        (
            "transactionProcessingStrategyId",
            payload.transaction_processing_strategy_id.is_some(),
        ),
    ] {
        if present {
            errors.push(ParamError::new(
                parameter,
                format!("{} cannot be changed while the cycle is active", parameter),
            ));
        }
    }
}

fn indexed(parameter: &str, index: usize) -> String {
    format!("{}[{}]", parameter, index + 1)
}

fn to_u32_opt(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn full_payload() -> FundPayload {
        FundPayload {
            name: Some("Main fund".to_string()),
            minimum_deposit_per_meeting: Some(dec("100")),
            maximum_deposit_per_meeting: Some(dec("500")),
            is_loan_limit_based_on_savings: Some(true),
            loan_limit_factor: Some(3),
            annual_nominal_interest_rate: Some(dec("24")),
            interest_method_id: Some(1),
            interest_calculated_in_period_id: Some(1),
            repay_every: Some(1),
            repayment_period_frequency_id: Some(1),
            number_of_repayments: Some(12),
            amortization_method_id: Some(1),
            transaction_processing_strategy_id: Some(StrategyId::new()),
            ..Default::default()
        }
    }

    fn group_charge() -> ChargePayload {
        ChargePayload {
            charge_applies_to_id: Some(101),
            charge_time_id: Some(101),
            charge_calculation_id: Some(1),
            amount: Some(dec("10")),
            penalty: Some(true),
            active: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn complete_payload_validates() {
        let terms = validate_new_fund(&full_payload()).unwrap();
        assert_eq!(terms.name, "Main fund");
        assert_eq!(terms.loan_limit, LoanLimit::BasedOnSavings { factor: 3 });
        assert_eq!(terms.loan_product.number_of_repayments, 12);
        assert!(terms.charges.is_empty());
    }

    #[test]
    fn empty_payload_accumulates_every_missing_parameter() {
        let err = validate_new_fund(&FundPayload::default()).unwrap_err();
        let params: Vec<&str> = err
            .param_errors
            .iter()
            .map(|e| e.parameter.as_str())
            .collect();
        for expected in [
            "name",
            "minimumDepositPerMeeting",
            "maximumDepositPerMeeting",
            "isLoanLimitBasedOnSavings",
            "annualNominalInterestRate",
            "interestMethodId",
            "interestCalculatedInPeriodId",
            "repayEvery",
            "repaymentPeriodFrequencyId",
            "numberOfRepayments",
            "amortizationMethodId",
            "transactionProcessingStrategyId",
        ] {
            assert!(params.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn name_length_is_capped() {
        let mut payload = full_payload();
        payload.name = Some("x".repeat(51));
        let err = validate_new_fund(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "name");
    }

    #[test]
    fn max_deposit_cannot_undercut_min() {
        let mut payload = full_payload();
        payload.maximum_deposit_per_meeting = Some(dec("50"));
        let err = validate_new_fund(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "maximumDepositPerMeeting");
    }

    #[test]
    fn savings_based_limit_requires_factor_and_rejects_amount() {
        let mut payload = full_payload();
        payload.loan_limit_factor = None;
        let err = validate_new_fund(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "loanLimitFactor");

        let mut payload = full_payload();
        payload.loan_limit_amount = Some(dec("1000"));
        let err = validate_new_fund(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "loanLimitAmount");
    }

    #[test]
    fn fixed_limit_requires_amount_and_rejects_factor() {
        let mut payload = full_payload();
        payload.is_loan_limit_based_on_savings = Some(false);
        payload.loan_limit_factor = None;
        payload.loan_limit_amount = Some(dec("1000"));
        let terms = validate_new_fund(&payload).unwrap();
        assert_eq!(
            terms.loan_limit,
            LoanLimit::FixedAmount { amount: dec("1000") }
        );

        payload.loan_limit_amount = None;
        let err = validate_new_fund(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "loanLimitAmount");
    }

    #[test]
    fn number_of_repayments_must_respect_bounds() {
        let mut payload = full_payload();
        payload.min_number_of_repayments = Some(4);
        payload.max_number_of_repayments = Some(10);
        let err = validate_new_fund(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "numberOfRepayments");

        payload.number_of_repayments = Some(8);
        assert!(validate_new_fund(&payload).is_ok());
    }

    #[test]
    fn repayment_bounds_only_max() {
        let mut payload = full_payload();
        payload.max_number_of_repayments = Some(10);
        let err = validate_new_fund(&payload).unwrap_err();
        assert!(err.param_errors[0].message.contains("cannot exceed"));
    }

    #[test]
    fn repayment_bounds_must_be_ordered() {
        let mut payload = full_payload();
        payload.min_number_of_repayments = Some(10);
        payload.max_number_of_repayments = Some(4);
        let err = validate_new_fund(&payload).unwrap_err();
        assert!(err
            .param_errors
            .iter()
            .any(|e| e.parameter == "maxNumberOfRepayments"));
    }

    #[test]
    fn new_charges_validate_code_domains() {
        let mut payload = full_payload();
        payload.charges = Some(vec![group_charge()]);
        let terms = validate_new_fund(&payload).unwrap();
        assert_eq!(terms.charges.len(), 1);
        assert_eq!(terms.charges[0].time, ChargeTime::MeetingAbsence);
    }

    #[test]
    fn group_charge_with_loan_time_is_rejected_with_index() {
        let mut bad = group_charge();
        bad.charge_time_id = Some(1); // disbursement is a loan-charge time
        let mut payload = full_payload();
        payload.charges = Some(vec![group_charge(), bad]);
        let err = validate_new_fund(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "chargeTimeId[2]");
    }

    #[test]
    fn empty_charge_array_is_rejected() {
        let mut payload = full_payload();
        payload.charges = Some(vec![]);
        let err = validate_new_fund(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "charges");
    }

    #[test]
    fn charge_with_id_is_rejected_on_creation() {
        let mut entry = group_charge();
        entry.id = Some(ChargeId::new());
        let mut payload = full_payload();
        payload.charges = Some(vec![entry]);
        let err = validate_new_fund(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "id[1]");
    }

    #[test]
    fn initiated_update_checks_only_supplied_parameters() {
        let payload = FundPayload {
            annual_nominal_interest_rate: Some(dec("30")),
            ..Default::default()
        };
        let update = validate_fund_update_initiated(&payload).unwrap();
        assert_eq!(update.annual_nominal_interest_rate, Some(dec("30")));
        assert!(update.name.is_none());
        assert!(update.loan_limit.is_none());
    }

    #[test]
    fn initiated_update_accepts_mixed_charge_entries() {
        let payload = FundPayload {
            charges: Some(vec![
                ChargePayload {
                    id: Some(ChargeId::new()),
                    amount: Some(dec("15")),
                    ..Default::default()
                },
                group_charge(),
            ]),
            ..Default::default()
        };
        let update = validate_fund_update_initiated(&payload).unwrap();
        assert_eq!(update.charge_patches.len(), 1);
        assert_eq!(update.new_charges.len(), 1);
    }

    #[test]
    fn loan_limit_sides_without_flag_are_rejected_on_update() {
        let payload = FundPayload {
            loan_limit_factor: Some(3),
            ..Default::default()
        };
        let err = validate_fund_update_initiated(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "isLoanLimitBasedOnSavings");
    }

    #[test]
    fn active_update_rejects_parameters_outside_the_allow_list() {
        let payload = FundPayload {
            name: Some("Renamed".to_string()),
            minimum_deposit_per_meeting: Some(dec("100")),
            repay_every: Some(2),
            ..Default::default()
        };
        let err = validate_fund_update_active(&payload).unwrap_err();
        let params: Vec<&str> = err
            .param_errors
            .iter()
            .map(|e| e.parameter.as_str())
            .collect();
        assert!(params.contains(&"minimumDepositPerMeeting"));
        assert!(params.contains(&"repayEvery"));
        assert!(!params.contains(&"name"));
    }

    #[test]
    fn active_update_accepts_allowed_parameters() {
        let charge_id = ChargeId::new();
        let payload = FundPayload {
            name: Some("Renamed".to_string()),
            annual_nominal_interest_rate: Some(dec("20")),
            charges: Some(vec![ChargePayload {
                id: Some(charge_id),
                amount: Some(dec("12")),
                active: Some(false),
                ..Default::default()
            }]),
            ..Default::default()
        };
        let update = validate_fund_update_active(&payload).unwrap();
        assert_eq!(update.name.as_deref(), Some("Renamed"));
        assert_eq!(update.charge_patches.len(), 1);
        assert_eq!(update.charge_patches[0].id, charge_id);
    }

    #[test]
    fn active_update_rejects_new_charge_entries() {
        let payload = FundPayload {
            charges: Some(vec![group_charge()]),
            ..Default::default()
        };
        let err = validate_fund_update_active(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "id[1]");
    }

    #[test]
    fn charge_patch_rejects_definition_changes() {
        let payload = FundPayload {
            charges: Some(vec![ChargePayload {
                id: Some(ChargeId::new()),
                charge_time_id: Some(101),
                amount: Some(dec("12")),
                ..Default::default()
            }]),
            ..Default::default()
        };
        let err = validate_fund_update_initiated(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "chargeTimeId[1]");
    }
}
