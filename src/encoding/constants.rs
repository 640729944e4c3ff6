/// Largest length a prefix can carry.
pub(crate) const MAX_LEN: usize = u32::max_value() as usize;

/// Presence flag written before an absent optional payload.
pub(crate) const FLAG_ABSENT: u8 = 0b0000_0000;
/// Presence flag written before a present optional payload.
pub(crate) const FLAG_PRESENT: u8 = 0b0000_0001;
