//! Hard caps on what a single engine will hold.

pub const MAX_RESOURCES: usize = 10_000;
pub const MAX_BOOKINGS: usize = 1_000_000;
pub const MAX_ID_LEN: usize = 128;
pub const MAX_NAME_LEN: usize = 256;
