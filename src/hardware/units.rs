//! Unit Conversions
//!
//! Shared byte/MiB conversions. Requirements are expressed in MiB and
//! inventory in bytes; both sides go through these helpers.

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * KIB;
pub const GIB: u64 = 1024 * MIB;

/// Decimal units, as disk vendors use them
pub const GB: u64 = 1_000_000_000;

/// MiB to bytes, saturating at `u64::MAX`
#[inline]
pub fn mib_to_bytes(mib: u64) -> u64 {
    mib.saturating_mul(MIB)
}

/// Bytes to whole MiB, rounding down
#[inline]
pub fn bytes_to_mib(bytes: u64) -> u64 {
    bytes / MIB
}
