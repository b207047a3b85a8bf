//! Balance transition rules
//!
//! Pure functions computing the next point total for a charge or a use.
//! They never touch a store; the wallet service decides what to do with
//! the outcome.

use crate::types::{Balance, Point, WalletError, MAX_POINT};

/// Compute the balance after charging `amount`
///
/// # Returns
///
/// * `Ok(Point)` - the new total
/// * `Err(WalletError::AmountTooSmall)` - if `amount < 1`
/// * `Err(WalletError::LimitExceeded)` - if the total would exceed `MAX_POINT`
pub fn charge(current: &Balance, amount: Point) -> Result<Point, WalletError> {
    validate_amount(amount)?;

    let limit_exceeded =
        || WalletError::limit_exceeded(current.user_id(), current.point(), amount, MAX_POINT);

    let total = current.point().checked_add(amount).ok_or_else(limit_exceeded)?;
    if total > MAX_POINT {
        return Err(limit_exceeded());
    }

    Ok(total)
}

/// Compute the balance after using `amount`
///
/// # Returns
///
/// * `Ok(Point)` - the new total
/// * `Err(WalletError::AmountTooSmall)` - if `amount < 1`
/// * `Err(WalletError::InsufficientBalance)` - if the total would drop below zero
pub fn use_points(current: &Balance, amount: Point) -> Result<Point, WalletError> {
    validate_amount(amount)?;

    let insufficient =
        || WalletError::insufficient_balance(current.user_id(), current.point(), amount);

    let total = current.point().checked_sub(amount).ok_or_else(insufficient)?;
    if total < 0 {
        return Err(insufficient());
    }

    Ok(total)
}

fn validate_amount(amount: Point) -> Result<(), WalletError> {
    if amount < 1 {
        return Err(WalletError::amount_too_small(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn balance(point: Point) -> Balance {
        Balance::new(1, point, Utc::now()).unwrap()
    }

    #[rstest]
    #[case::from_zero(0, 100, 100)]
    #[case::accumulates(1_000, 500, 1_500)]
    #[case::reaches_maximum(90_000, 10_000, MAX_POINT)]
    #[case::minimum_amount(0, 1, 1)]
    fn test_charge_succeeds(
        #[case] current: Point,
        #[case] amount: Point,
        #[case] expected: Point,
    ) {
        assert_eq!(charge(&balance(current), amount), Ok(expected));
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-1)]
    #[case::very_negative(Point::MIN)]
    fn test_charge_rejects_amount_below_one(#[case] amount: Point) {
        assert_eq!(
            charge(&balance(500), amount),
            Err(WalletError::AmountTooSmall { amount })
        );
    }

    #[rstest]
    #[case::one_over(90_000, 10_001)]
    #[case::at_maximum(MAX_POINT, 1)]
    #[case::overflowing(MAX_POINT, Point::MAX)]
    fn test_charge_rejects_over_limit(#[case] current: Point, #[case] amount: Point) {
        assert_eq!(
            charge(&balance(current), amount),
            Err(WalletError::LimitExceeded {
                user: 1,
                current,
                amount,
                max: MAX_POINT
            })
        );
    }

    #[rstest]
    #[case::partial(1_000, 300, 700)]
    #[case::exact(1_000, 1_000, 0)]
    #[case::minimum_amount(1, 1, 0)]
    fn test_use_succeeds(
        #[case] current: Point,
        #[case] amount: Point,
        #[case] expected: Point,
    ) {
        assert_eq!(use_points(&balance(current), amount), Ok(expected));
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-50)]
    fn test_use_rejects_amount_below_one(#[case] amount: Point) {
        assert_eq!(
            use_points(&balance(500), amount),
            Err(WalletError::AmountTooSmall { amount })
        );
    }

    #[rstest]
    #[case::one_over(1_000, 1_001)]
    #[case::empty_balance(0, 1)]
    #[case::huge_amount(0, Point::MAX)]
    fn test_use_rejects_insufficient_balance(#[case] current: Point, #[case] amount: Point) {
        assert_eq!(
            use_points(&balance(current), amount),
            Err(WalletError::InsufficientBalance {
                user: 1,
                current,
                requested: amount
            })
        );
    }

    #[test]
    fn test_rules_leave_input_untouched() {
        let current = balance(1_000);
        let before = current.clone();

        let _ = charge(&current, 500);
        let _ = use_points(&current, 5_000);

        assert_eq!(current, before);
    }
}
