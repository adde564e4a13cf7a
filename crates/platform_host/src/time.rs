//! Time and randomness helpers shared across host contracts and adapters.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

thread_local! {
    static LAST_TIMESTAMP_MS: Cell<u64> = const { Cell::new(0) };
}

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns a monotonic unix millisecond timestamp.
///
/// Values are monotonic within the current process even when the system clock does not advance,
/// which keeps timestamp-derived ids unique for rapid successive calls.
pub fn next_monotonic_timestamp_ms() -> u64 {
    let now = unix_time_ms_now();
    LAST_TIMESTAMP_MS.with(|last| {
        let next = now.max(last.get().saturating_add(1));
        last.set(next);
        next
    })
}

/// Returns a uniformly distributed value in `[0, 1)` from the platform entropy source
/// (`crypto.getRandomValues` in the browser).
pub fn random_unit() -> Result<f64, getrandom::Error> {
    let mut bytes = [0_u8; 8];
    getrandom::getrandom(&mut bytes)?;
    Ok((u64::from_le_bytes(bytes) >> 11) as f64 / (1_u64 << 53) as f64)
}

/// Returns a random 32-bit value from the platform entropy source.
pub fn random_u32() -> Result<u32, getrandom::Error> {
    let mut bytes = [0_u8; 4];
    getrandom::getrandom(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_timestamps_strictly_increase() {
        let a = next_monotonic_timestamp_ms();
        let b = next_monotonic_timestamp_ms();
        assert!(b > a);
    }

    #[test]
    fn random_unit_stays_in_range() {
        for _ in 0..1000 {
            let value = random_unit().expect("entropy");
            assert!((0.0..1.0).contains(&value), "{value} out of range");
        }
    }

    #[test]
    fn random_values_differ_between_draws() {
        let draws: std::collections::HashSet<u32> =
            (0..16).map(|_| random_u32().expect("entropy")).collect();
        assert!(draws.len() > 1);
    }
}
