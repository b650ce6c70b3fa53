/// 32-bit polynomial hash of a ticker.
///
/// `hash = hash * 31 + unit` over UTF-16 code units with wrapping `i32`
/// arithmetic, absolute value taken at the end. Stable across runs and
/// platforms.
pub fn symbol_seed(symbol: &str) -> u32 {
    symbol
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_symbol_seeds_zero() {
        assert_eq!(symbol_seed(""), 0);
    }

    #[test]
    fn test_known_values() {
        // "A" = 65; "AB" = 65 * 31 + 66
        assert_eq!(symbol_seed("A"), 65);
        assert_eq!(symbol_seed("AB"), 2081);
        assert_eq!(symbol_seed("AAPL"), 2_001_436);
    }

    #[test]
    fn test_long_symbols_wrap_without_panicking() {
        let seed = symbol_seed("THIS-IS-A-VERY-LONG-SYMBOL-THAT-OVERFLOWS");
        assert_eq!(seed, symbol_seed("THIS-IS-A-VERY-LONG-SYMBOL-THAT-OVERFLOWS"));
    }
}
