//! VRF seed construction and the rules deriving game outcomes from a
//! fulfilled 64-byte randomness buffer.
//!
//! Byte ranges are part of the protocol and never overlap within one
//! consumption:
//!
//! - `[0..4]` / `[4..8]`   spawn position
//! - `[0..8]`              catch roll (throws only)
//! - `[8..16]`             vault index draw
//! - `[16..20]` / `[20..24]` relocation position after a third miss

use crate::constants::*;

/// Build the 32-byte seed naming a VRF request: counter (LE), request
/// type, zero padding, domain tag. The counter is monotonic, so seeds
/// never collide.
pub fn make_vrf_seed(counter: u64, request_type: u8) -> [u8; 32] {
    let mut seed = [0u8; 32];
    seed[..8].copy_from_slice(&counter.to_le_bytes());
    seed[8] = request_type;
    seed[24..32].copy_from_slice(VRF_SEED_DOMAIN);
    seed
}

fn coord(bytes: [u8; 4]) -> u16 {
    (u32::from_le_bytes(bytes) % (MAX_COORDINATE as u32 + 1)) as u16
}

/// Spawn position from bytes [0..8].
pub fn spawn_position(randomness: &[u8; 64]) -> (u16, u16) {
    let x = coord(randomness[0..4].try_into().unwrap());
    let y = coord(randomness[4..8].try_into().unwrap());
    (x, y)
}

/// Catch roll in 0-99 from bytes [0..8]. A throw succeeds when the
/// roll is below the tier's catch rate.
pub fn catch_roll(randomness: &[u8; 64]) -> u8 {
    let bytes: [u8; 8] = randomness[0..8].try_into().unwrap();
    (u64::from_le_bytes(bytes) % 100) as u8
}

/// Vault index draw from bytes [8..16], over the live set of `count`
/// entries. `count` must be non-zero.
pub fn vault_draw(randomness: &[u8; 64], count: u8) -> usize {
    let bytes: [u8; 8] = randomness[8..16].try_into().unwrap();
    (u64::from_le_bytes(bytes) % count as u64) as usize
}

/// Relocation position from bytes [16..24], used when a Pokemon
/// survives its third miss.
pub fn relocation_position(randomness: &[u8; 64]) -> (u16, u16) {
    let x = coord(randomness[16..20].try_into().unwrap());
    let y = coord(randomness[20..24].try_into().unwrap());
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_layout_matches_protocol() {
        let seed = make_vrf_seed(0x0102030405060708, VRF_TYPE_THROW);
        assert_eq!(&seed[..8], &[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
        assert_eq!(seed[8], VRF_TYPE_THROW);
        assert_eq!(&seed[9..24], &[0u8; 15]);
        assert_eq!(&seed[24..32], b"pkblgame");
    }

    #[test]
    fn seeds_differ_by_counter_and_type() {
        assert_ne!(
            make_vrf_seed(1, VRF_TYPE_SPAWN),
            make_vrf_seed(2, VRF_TYPE_SPAWN)
        );
        assert_ne!(
            make_vrf_seed(1, VRF_TYPE_SPAWN),
            make_vrf_seed(1, VRF_TYPE_THROW)
        );
    }

    #[test]
    fn spawn_position_reads_first_eight_bytes() {
        let mut r = [0u8; 64];
        // x = 1234 mod 1000 = 234, y = 999 exactly.
        r[0..4].copy_from_slice(&1234u32.to_le_bytes());
        r[4..8].copy_from_slice(&999u32.to_le_bytes());
        assert_eq!(spawn_position(&r), (234, 999));
    }

    #[test]
    fn positions_stay_on_grid() {
        let mut r = [0xFFu8; 64];
        let (x, y) = spawn_position(&r);
        assert!(x <= MAX_COORDINATE && y <= MAX_COORDINATE);
        let (x, y) = relocation_position(&r);
        assert!(x <= MAX_COORDINATE && y <= MAX_COORDINATE);
        r = [0u8; 64];
        assert_eq!(spawn_position(&r), (0, 0));
        assert_eq!(relocation_position(&r), (0, 0));
    }

    #[test]
    fn catch_roll_is_mod_100_of_leading_u64() {
        let mut r = [0u8; 64];
        assert_eq!(catch_roll(&r), 0);
        r[0..8].copy_from_slice(&199u64.to_le_bytes());
        assert_eq!(catch_roll(&r), 99);
        r[0..8].copy_from_slice(&100u64.to_le_bytes());
        assert_eq!(catch_roll(&r), 0);
    }

    #[test]
    fn vault_draw_ignores_catch_roll_bytes() {
        let mut r = [0u8; 64];
        r[0..8].copy_from_slice(&u64::MAX.to_le_bytes());
        r[8..16].copy_from_slice(&7u64.to_le_bytes());
        assert_eq!(vault_draw(&r, 20), 7);
        assert_eq!(vault_draw(&r, 3), 1);
        assert_eq!(vault_draw(&r, 1), 0);
    }

    #[test]
    fn relocation_reads_bytes_sixteen_to_twenty_four() {
        let mut r = [0u8; 64];
        r[16..20].copy_from_slice(&1640u32.to_le_bytes());
        r[20..24].copy_from_slice(&2123u32.to_le_bytes());
        assert_eq!(relocation_position(&r), (640, 123));
    }
}
