use proptest::prelude::*;

use granary_types::{AccountAddress, LedgerParams, Timestamp, TokenId};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp elapsed_since: elapsed_since(now) = now - self.
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let now = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
    }

    /// Timestamp elapsed_since saturates to 0 when now < self.
    #[test]
    fn timestamp_elapsed_since_saturates(
        base in 1u64..1_000_000,
        deficit in 1u64..1_000_000,
    ) {
        let later = Timestamp::new(base + deficit);
        let earlier = Timestamp::new(base);
        prop_assert_eq!(later.elapsed_since(earlier), 0);
    }

    /// add_secs then elapsed_since round-trips the offset.
    #[test]
    fn timestamp_add_secs_elapsed(base in 0u64..1_000_000, secs in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let later = t.add_secs(secs);
        prop_assert_eq!(t.elapsed_since(later), secs);
    }

    /// Timestamp has_expired agrees with manual arithmetic.
    #[test]
    fn timestamp_has_expired_correct(
        start in 0u64..500_000,
        duration in 1u64..500_000,
        offset in 0u64..1_000_000,
    ) {
        let t = Timestamp::new(start);
        let now = Timestamp::new(start.saturating_add(offset));
        prop_assert_eq!(t.has_expired(duration, now), offset >= duration);
    }

    /// Timestamp bincode serialization roundtrip.
    #[test]
    fn timestamp_bincode_roundtrip(secs in 0u64..u64::MAX) {
        let t = Timestamp::new(secs);
        let encoded = bincode::serialize(&t).unwrap();
        let decoded: Timestamp = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, t);
    }

    /// AccountAddress preserves the raw string and stays valid.
    #[test]
    fn address_roundtrip(suffix in "[a-z0-9]{1,60}") {
        let raw = format!("gry_{suffix}");
        let addr = AccountAddress::new(raw.clone());
        prop_assert_eq!(addr.as_str(), raw.as_str());
        prop_assert!(addr.is_valid());
    }

    /// AccountAddress bincode serialization roundtrip.
    #[test]
    fn address_bincode_roundtrip(suffix in "[a-z0-9]{1,60}") {
        let addr = AccountAddress::new(format!("gry_{suffix}"));
        let encoded = bincode::serialize(&addr).unwrap();
        let decoded: AccountAddress = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, addr);
    }

    /// TokenId bincode serialization roundtrip.
    #[test]
    fn token_id_bincode_roundtrip(raw in "[A-Z]{2,12}") {
        let id = TokenId::new(raw.clone());
        let encoded = bincode::serialize(&id).unwrap();
        let decoded: TokenId = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded.as_str(), raw.as_str());
    }

    /// LedgerParams bincode serialization roundtrip.
    #[test]
    fn params_bincode_roundtrip(rate in 0u64..=100, cooldown in 0u64..=31_536_000) {
        let params = LedgerParams::new(rate, cooldown);
        let encoded = bincode::serialize(&params).unwrap();
        let decoded: LedgerParams = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, params);
    }
}

#[test]
#[should_panic]
fn address_rejects_missing_prefix() {
    let _ = AccountAddress::new("grain_account_1");
}
