//! Routing table constants.

/// Nominal bucket capacity (K).
///
/// `update` admits a new entry while a bucket holds `<= BUCKET_SIZE`
/// entries, so a bucket tops out at `BUCKET_SIZE + 1` identities.
pub const BUCKET_SIZE: usize = 16;
