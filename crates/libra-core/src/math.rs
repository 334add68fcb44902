// crates/libra-core/src/math.rs
//
// 18-decimal fixed-point ("wad") arithmetic on u128 amounts.
//
// Products are formed in 256 bits so `a * b / c` never overflows in the
// intermediate step; only a result that does not fit back into u128 is
// reported as an error.

// construct_uint! expansions trip these
#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use uint::construct_uint;

use crate::error::LibraError;

construct_uint! {
    /// 256-bit intermediate for wad products.
    pub struct U256(4);
}

/// Scale of a wad: 1.0 == 10^18.
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Number of decimal places in a wad.
pub const WAD_DECIMALS: usize = 18;

/// `a * b / denominator`, rounded down.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128, LibraError> {
    if denominator == 0 {
        return Err(LibraError::Arithmetic("division by zero".to_string()));
    }
    let result = U256::from(a) * U256::from(b) / U256::from(denominator);
    if result > U256::from(u128::MAX) {
        return Err(LibraError::Arithmetic(format!(
            "{} * {} / {} overflows u128",
            a, b, denominator
        )));
    }
    Ok(result.as_u128())
}

/// `amount * percent / 100`.
pub fn percent_of(amount: u128, percent: u8) -> Result<u128, LibraError> {
    mul_div(amount, percent as u128, 100)
}

pub fn checked_add(a: u128, b: u128) -> Result<u128, LibraError> {
    a.checked_add(b)
        .ok_or_else(|| LibraError::Arithmetic(format!("{} + {} overflows u128", a, b)))
}

pub fn checked_sub(a: u128, b: u128) -> Result<u128, LibraError> {
    a.checked_sub(b)
        .ok_or_else(|| LibraError::Arithmetic(format!("{} - {} underflows", a, b)))
}

/// Whole tokens to wad.
pub fn to_wad(whole: u128) -> Result<u128, LibraError> {
    whole
        .checked_mul(WAD)
        .ok_or_else(|| LibraError::Arithmetic(format!("{} tokens overflow a wad", whole)))
}

/// Render a wad as a decimal string, trimming trailing zeros.
pub fn format_wad(value: u128) -> String {
    let whole = value / WAD;
    let frac = value % WAD;
    if frac == 0 {
        return whole.to_string();
    }
    let frac_str = format!("{:0width$}", frac, width = WAD_DECIMALS);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}
