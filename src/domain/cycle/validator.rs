//! Request validation for cycle commands.
//!
//! Payloads are strict about their parameter sets (unknown parameters fail
//! deserialization) and every rule violation is collected before a single
//! aggregated error is returned.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::foundation::{
    Currency, DepositsPaymentStrategy, DomainError, ParamError,
};

/// Wire payload for cycle create and update requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CyclePayload {
    pub locale: Option<String>,
    pub date_format: Option<String>,
    pub currency_code: Option<String>,
    pub currency_digits: Option<i64>,
    pub currency_multiples_of: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_share_based: Option<bool>,
    pub unit_price_of_share: Option<Decimal>,
    pub is_client_additions_allowed_in_active_cycle: Option<bool>,
    pub is_client_exit_allowed_in_active_cycle: Option<bool>,
    pub does_individual_client_exit_forfeit_gains: Option<bool>,
    pub deposits_payment_strategy_id: Option<i32>,
    pub copy_funds_from_previous_cycle: Option<bool>,
}

/// Wire payload for cycle activation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CycleActivationPayload {
    pub locale: Option<String>,
    pub date_format: Option<String>,
    pub start_date: Option<NaiveDate>,
}

/// Wire payload for share-out close.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CycleClosePayload {
    pub locale: Option<String>,
    pub date_format: Option<String>,
    pub end_date: Option<NaiveDate>,
}

/// Fully-validated terms for a new cycle.
#[derive(Debug, Clone)]
pub struct NewCycleTerms {
    pub currency: Currency,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_share_based: bool,
    pub unit_price_of_share: Decimal,
    pub is_client_additions_allowed_in_active_cycle: bool,
    pub is_client_exit_allowed_in_active_cycle: bool,
    pub does_individual_client_exit_forfeit_gains: bool,
    pub deposits_payment_strategy: DepositsPaymentStrategy,
}

/// Validated field updates for an Initiated cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleUpdate {
    pub currency_code: Option<String>,
    pub currency_digits: Option<u32>,
    pub currency_multiples_of: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_share_based: Option<bool>,
    pub unit_price_of_share: Option<Decimal>,
    pub is_client_additions_allowed_in_active_cycle: Option<bool>,
    pub is_client_exit_allowed_in_active_cycle: Option<bool>,
    pub does_individual_client_exit_forfeit_gains: Option<bool>,
    pub deposits_payment_strategy: Option<DepositsPaymentStrategy>,
}

/// Validates a cycle creation payload.
pub fn validate_new_cycle(payload: &CyclePayload) -> Result<NewCycleTerms, DomainError> {
    let mut errors: Vec<ParamError> = Vec::new();

    let currency = match (payload.currency_code.as_deref(), payload.currency_digits) {
        (Some(code), Some(digits)) => {
            let digits = check_currency_digits(digits, &mut errors);
            let multiples = payload
                .currency_multiples_of
                .and_then(|m| check_currency_multiples(m, &mut errors));
            match digits {
                Some(digits) => match Currency::new(code, digits, multiples) {
                    Ok(currency) => Some(currency),
                    Err(currency_errors) => {
                        errors.extend(currency_errors);
                        None
                    }
                },
                None => None,
            }
        }
        (code, digits) => {
            if code.is_none() {
                errors.push(ParamError::new("currencyCode", "currencyCode is required"));
            }
            if digits.is_none() {
                errors.push(ParamError::new(
                    "currencyDigits",
                    "currencyDigits is required",
                ));
            }
            None
        }
    };

    let start_date = require(payload.start_date, "startDate", &mut errors);
    let end_date = require(payload.end_date, "endDate", &mut errors);

    let is_share_based = require(payload.is_share_based, "isShareBased", &mut errors);
    let unit_price_of_share = match is_share_based {
        Some(true) => match payload.unit_price_of_share {
            Some(price) if price > Decimal::ZERO => Some(price),
            Some(_) => {
                errors.push(ParamError::new(
                    "unitPriceOfShare",
                    "unitPriceOfShare must be a positive amount",
                ));
                None
            }
            None => {
                errors.push(ParamError::new(
                    "unitPriceOfShare",
                    "unitPriceOfShare is required for a share based cycle",
                ));
                None
            }
        },
        _ => Some(Decimal::ONE),
    };

    let additions_allowed = require(
        payload.is_client_additions_allowed_in_active_cycle,
        "isClientAdditionsAllowedInActiveCycle",
        &mut errors,
    );
    let exit_allowed = require(
        payload.is_client_exit_allowed_in_active_cycle,
        "isClientExitAllowedInActiveCycle",
        &mut errors,
    );
    let exit_forfeits = require(
        payload.does_individual_client_exit_forfeit_gains,
        "doesIndividualClientExitForfeitGains",
        &mut errors,
    );

    let strategy = match payload.deposits_payment_strategy_id {
        Some(code) => check_strategy(code, &mut errors),
        None => {
            errors.push(ParamError::new(
                "depositsPaymentStrategyId",
                "depositsPaymentStrategyId is required",
            ));
            None
        }
    };

    let terms = (|| {
        Some(NewCycleTerms {
            currency: currency?,
            start_date: start_date?,
            end_date: end_date?,
            is_share_based: is_share_based?,
            unit_price_of_share: unit_price_of_share?,
            is_client_additions_allowed_in_active_cycle: additions_allowed?,
            is_client_exit_allowed_in_active_cycle: exit_allowed?,
            does_individual_client_exit_forfeit_gains: exit_forfeits?,
            deposits_payment_strategy: strategy?,
        })
    })();

    match terms {
        Some(terms) if errors.is_empty() => Ok(terms),
        _ => Err(DomainError::validation(errors)),
    }
}

/// Validates a cycle update payload. Each rule applies only when the
/// parameter is present.
pub fn validate_cycle_update(payload: &CyclePayload) -> Result<CycleUpdate, DomainError> {
    let mut errors: Vec<ParamError> = Vec::new();
    let mut update = CycleUpdate::default();

    if let Some(code) = payload.currency_code.as_deref() {
        if code.trim().is_empty() {
            errors.push(ParamError::new("currencyCode", "currencyCode cannot be blank"));
        } else if code.len() > 3 {
            errors.push(ParamError::new(
                "currencyCode",
                "currencyCode cannot exceed 3 characters",
            ));
        } else {
            update.currency_code = Some(code.to_string());
        }
    }
    if let Some(digits) = payload.currency_digits {
        update.currency_digits = check_currency_digits(digits, &mut errors);
    }
    if let Some(multiples) = payload.currency_multiples_of {
        update.currency_multiples_of = check_currency_multiples(multiples, &mut errors);
    }

    update.start_date = payload.start_date;
    update.end_date = payload.end_date;
    update.is_share_based = payload.is_share_based;

    if let Some(price) = payload.unit_price_of_share {
        if price > Decimal::ZERO {
            update.unit_price_of_share = Some(price);
        } else {
            errors.push(ParamError::new(
                "unitPriceOfShare",
                "unitPriceOfShare must be a positive amount",
            ));
        }
    }

    update.is_client_additions_allowed_in_active_cycle =
        payload.is_client_additions_allowed_in_active_cycle;
    update.is_client_exit_allowed_in_active_cycle = payload.is_client_exit_allowed_in_active_cycle;
    update.does_individual_client_exit_forfeit_gains =
        payload.does_individual_client_exit_forfeit_gains;

    if let Some(code) = payload.deposits_payment_strategy_id {
        update.deposits_payment_strategy = check_strategy(code, &mut errors);
    }

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(DomainError::validation(errors))
    }
}

/// Validates an activation payload, returning the activation date.
pub fn validate_activation(payload: &CycleActivationPayload) -> Result<NaiveDate, DomainError> {
    match payload.start_date {
        Some(date) => Ok(date),
        None => Err(DomainError::validation(vec![ParamError::new(
            "startDate",
            "startDate is required",
        )])),
    }
}

/// Validates a share-out-close payload, returning the closing date.
pub fn validate_close(payload: &CycleClosePayload) -> Result<NaiveDate, DomainError> {
    match payload.end_date {
        Some(date) => Ok(date),
        None => Err(DomainError::validation(vec![ParamError::new(
            "endDate",
            "endDate is required",
        )])),
    }
}

fn require<T>(value: Option<T>, parameter: &str, errors: &mut Vec<ParamError>) -> Option<T> {
    if value.is_none() {
        errors.push(ParamError::new(
            parameter,
            format!("{} is required", parameter),
        ));
    }
    value
}

fn check_currency_digits(digits: i64, errors: &mut Vec<ParamError>) -> Option<u32> {
    if (0..=i64::from(Currency::MAX_DIGITS)).contains(&digits) {
        Some(digits as u32)
    } else {
        errors.push(ParamError::new(
            "currencyDigits",
            format!("currencyDigits must be between 0 and {}", Currency::MAX_DIGITS),
        ));
        None
    }
}

fn check_currency_multiples(multiples: i64, errors: &mut Vec<ParamError>) -> Option<u32> {
    if multiples >= 0 {
        Some(multiples as u32)
    } else {
        errors.push(ParamError::new(
            "currencyMultiplesOf",
            "currencyMultiplesOf cannot be negative",
        ));
        None
    }
}

fn check_strategy(code: i32, errors: &mut Vec<ParamError>) -> Option<DepositsPaymentStrategy> {
    match DepositsPaymentStrategy::from_code(code) {
        Ok(strategy) => Some(strategy),
        Err(_) => {
            errors.push(ParamError::new(
                "depositsPaymentStrategyId",
                "depositsPaymentStrategyId must be between 1 and 6",
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn full_payload() -> CyclePayload {
        CyclePayload {
            currency_code: Some("KES".to_string()),
            currency_digits: Some(2),
            start_date: Some(date(2024, 1, 1)),
            end_date: Some(date(2024, 6, 24)),
            is_share_based: Some(false),
            is_client_additions_allowed_in_active_cycle: Some(true),
            is_client_exit_allowed_in_active_cycle: Some(true),
            does_individual_client_exit_forfeit_gains: Some(false),
            deposits_payment_strategy_id: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn complete_payload_validates() {
        let terms = validate_new_cycle(&full_payload()).unwrap();
        assert_eq!(terms.currency.code(), "KES");
        assert!(!terms.is_share_based);
        assert_eq!(terms.unit_price_of_share, Decimal::ONE);
        assert_eq!(
            terms.deposits_payment_strategy,
            DepositsPaymentStrategy::ChargesLoansDeposits
        );
    }

    #[test]
    fn empty_payload_accumulates_every_missing_parameter() {
        let err = validate_new_cycle(&CyclePayload::default()).unwrap_err();
        let params: Vec<&str> = err
            .param_errors
            .iter()
            .map(|e| e.parameter.as_str())
            .collect();
        assert!(params.contains(&"currencyCode"));
        assert!(params.contains(&"currencyDigits"));
        assert!(params.contains(&"startDate"));
        assert!(params.contains(&"endDate"));
        assert!(params.contains(&"isShareBased"));
        assert!(params.contains(&"isClientAdditionsAllowedInActiveCycle"));
        assert!(params.contains(&"isClientExitAllowedInActiveCycle"));
        assert!(params.contains(&"doesIndividualClientExitForfeitGains"));
        assert!(params.contains(&"depositsPaymentStrategyId"));
    }

    #[test]
    fn share_based_cycle_requires_positive_unit_price() {
        let mut payload = full_payload();
        payload.is_share_based = Some(true);
        let err = validate_new_cycle(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "unitPriceOfShare");

        payload.unit_price_of_share = Some(dec("0"));
        let err = validate_new_cycle(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "unitPriceOfShare");

        payload.unit_price_of_share = Some(dec("25"));
        let terms = validate_new_cycle(&payload).unwrap();
        assert_eq!(terms.unit_price_of_share, dec("25"));
    }

    #[test]
    fn strategy_code_out_of_range_is_rejected() {
        let mut payload = full_payload();
        payload.deposits_payment_strategy_id = Some(7);
        let err = validate_new_cycle(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "depositsPaymentStrategyId");
    }

    #[test]
    fn currency_digits_out_of_range_is_rejected() {
        let mut payload = full_payload();
        payload.currency_digits = Some(7);
        let err = validate_new_cycle(&payload).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "currencyDigits");
    }

    #[test]
    fn unknown_parameter_fails_deserialization() {
        let result = serde_json::from_str::<CyclePayload>(
            r#"{"currencyCode": "KES", "somethingElse": 1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn activation_payload_parses_known_parameters_only() {
        let payload: CycleActivationPayload = serde_json::from_str(
            r#"{"locale": "en", "dateFormat": "yyyy-MM-dd", "startDate": "2024-01-08"}"#,
        )
        .unwrap();
        assert_eq!(validate_activation(&payload).unwrap(), date(2024, 1, 8));

        let result =
            serde_json::from_str::<CycleActivationPayload>(r#"{"endDate": "2024-01-08"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn activation_requires_start_date() {
        let err = validate_activation(&CycleActivationPayload::default()).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "startDate");
    }

    #[test]
    fn close_requires_end_date() {
        let err = validate_close(&CycleClosePayload::default()).unwrap_err();
        assert_eq!(err.param_errors[0].parameter, "endDate");
    }

    #[test]
    fn update_checks_only_supplied_parameters() {
        let payload = CyclePayload {
            currency_digits: Some(0),
            ..Default::default()
        };
        let update = validate_cycle_update(&payload).unwrap();
        assert_eq!(update.currency_digits, Some(0));
        assert!(update.currency_code.is_none());
        assert!(update.start_date.is_none());
    }

    #[test]
    fn update_rejects_invalid_supplied_values() {
        let payload = CyclePayload {
            currency_code: Some("".to_string()),
            unit_price_of_share: Some(dec("-1")),
            deposits_payment_strategy_id: Some(0),
            ..Default::default()
        };
        let err = validate_cycle_update(&payload).unwrap_err();
        assert_eq!(err.param_errors.len(), 3);
    }
}
