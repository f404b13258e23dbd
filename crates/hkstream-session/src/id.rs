//! Session id derivation.
//!
//! When the caller does not supply a session id, one is packed from three
//! components into disjoint bit ranges of a 64-bit integer, most significant
//! first: truncated timestamp (32 bits), process id (14 bits), CRC-32 of the
//! description string (14 bits). Leading with the timestamp makes derived
//! ids approximately sortable by creation time across producers, while the
//! pid and description checksum keep concurrent producers from colliding.

/// Bit widths of the packed components, most significant first.
const ID_LAYOUT: [u32; 3] = [32, 14, 14];

/// Derive a session id from a timestamp and a description string.
pub fn derive_session_id(timestamp: f64, description: &str) -> i64 {
    let components: [u64; 3] = [
        timestamp as u64,
        std::process::id() as u64,
        u64::from(crc32fast::hash(description.as_bytes())),
    ];

    let mut id: u64 = 0;
    for (value, bits) in components.into_iter().zip(ID_LAYOUT) {
        id = (id << bits) | (value % (1u64 << bits));
    }
    id as i64
}
