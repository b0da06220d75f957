//! Exact integer arithmetic.
//!
//! `/` and `%` truncate toward zero; `mod` is floored. Results wider than
//! [`EvalConfig::max_integer_bits`](crate::EvalConfig) are rejected, and
//! `^` checks its estimated width before computing anything.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use vx_ir::Op;
use vx_value::{
    bigint_overflow, division_by_zero, negative_exponent, operator_not_defined, EvalError,
};

use crate::Evaluator;

impl Evaluator {
    pub(crate) fn calc_integers(&self, a: &BigInt, op: Op, b: &BigInt) -> Result<BigInt, EvalError> {
        let result = match op {
            Op::Add => a + b,
            Op::Subtract => a - b,
            Op::Multiply => a * b,
            Op::Divide => a / nonzero(b)?,
            Op::Remain => a % nonzero(b)?,
            Op::Modulo => a.mod_floor(nonzero(b)?),
            Op::Empower => self.raise_to_power(a, b)?,
            _ => return Err(operator_not_defined("integers")),
        };
        self.check_width(result)
    }

    fn raise_to_power(&self, base: &BigInt, exponent: &BigInt) -> Result<BigInt, EvalError> {
        if exponent.is_negative() {
            return Err(negative_exponent());
        }
        if base.is_zero() || base.is_one() || exponent.is_zero() {
            return Ok(if exponent.is_zero() {
                BigInt::one()
            } else {
                base.clone()
            });
        }
        if base.abs().is_one() {
            return Ok(if exponent.is_even() {
                BigInt::one()
            } else {
                base.clone()
            });
        }

        // |base| >= 2, so the result needs at least (bits - 1) * exponent + 1 bits.
        let exp = exponent.to_u32().ok_or_else(bigint_overflow)?;
        let lower_bound = (u128::from(base.bits()) - 1) * u128::from(exp) + 1;
        if lower_bound > u128::from(self.config.max_integer_bits) {
            return Err(bigint_overflow());
        }
        Ok(base.pow(exp))
    }

    fn check_width(&self, n: BigInt) -> Result<BigInt, EvalError> {
        if n.bits() > self.config.max_integer_bits {
            Err(bigint_overflow())
        } else {
            Ok(n)
        }
    }
}

fn nonzero(x: &BigInt) -> Result<&BigInt, EvalError> {
    if x.is_zero() {
        Err(division_by_zero())
    } else {
        Ok(x)
    }
}
