//! # Protocol Properties
//!
//! Property tests over arbitrary operation sequences: commitment
//! uniqueness, soundness and completeness of membership, threshold
//! monotonicity, duplicate-report rejection, and structural unlinkability
//! of ledger records.

use proptest::prelude::*;

use whistle_core::{Commitment, DisclosureKind, ProtocolError, ReportHash, WalletRef};
use whistle_crypto::{commit, generate_secret, MembershipSecret};
use whistle_protocol::{ProtocolSnapshot, ProtocolState};

fn copy(s: &MembershipSecret) -> MembershipSecret {
    MembershipSecret::from_hex(&s.expose_hex()).unwrap()
}

fn secret_from(seed: [u8; 32]) -> MembershipSecret {
    MembershipSecret::from_bytes(seed)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn commitment_registers_at_most_once(
        picks in proptest::collection::vec(0usize..6, 1..30)
    ) {
        let commitments: Vec<Commitment> = (0..6).map(|_| commit(&generate_secret())).collect();
        let mut state = ProtocolState::new();
        let mut accepted = std::collections::HashSet::new();
        for i in picks {
            let c = commitments[i];
            match state.register(c, WalletRef::ZERO) {
                Ok(_) => prop_assert!(accepted.insert(c)),
                Err(e) => {
                    prop_assert_eq!(e, ProtocolError::DuplicateCommitment);
                    prop_assert!(accepted.contains(&c));
                }
            }
        }
        prop_assert_eq!(state.registry().len(), accepted.len());
    }

    #[test]
    fn unregistered_secret_is_rejected(
        members in proptest::collection::vec(any::<[u8; 32]>(), 0..10),
        outsider in any::<[u8; 32]>(),
        hash in any::<[u8; 32]>(),
    ) {
        prop_assume!(!members.contains(&outsider));
        let mut state = ProtocolState::new();
        for m in &members {
            let _ = state.register(commit(&secret_from(*m)), WalletRef::ZERO);
        }
        let s = secret_from(outsider);
        prop_assert!(!state.prove_membership(&s));
        prop_assert_eq!(
            state.submit_report(ReportHash::from_bytes(hash), &s),
            Err(ProtocolError::UnregisteredMembership)
        );
    }

    #[test]
    fn registered_secret_always_proves(
        members in proptest::collection::vec(any::<[u8; 32]>(), 1..10),
        repeats in 1usize..5,
    ) {
        let mut state = ProtocolState::new();
        for m in &members {
            let _ = state.register(commit(&secret_from(*m)), WalletRef::ZERO);
        }
        for m in &members {
            for _ in 0..repeats {
                prop_assert!(state.prove_membership(&secret_from(*m)));
            }
        }
    }

    #[test]
    fn severity_threshold_is_monotone(min in 0u64..=20, actual in 0u64..=20) {
        let mut state = ProtocolState::new();
        let s = generate_secret();
        state.register(commit(&s), WalletRef::ZERO).unwrap();
        if state.prove_severity(min, actual, &s).is_ok() {
            for lower in 0..=min {
                prop_assert_eq!(state.prove_severity(lower, actual, &s), Ok(true));
            }
        }
        for higher in (actual + 1)..=21 {
            prop_assert_eq!(
                state.prove_severity(higher, actual, &s),
                Err(ProtocolError::ThresholdNotMet { kind: DisclosureKind::Severity })
            );
        }
    }

    #[test]
    fn financial_threshold_is_monotone(min in any::<u64>(), actual in any::<u64>(), other in any::<u64>()) {
        let mut state = ProtocolState::new();
        let s = generate_secret();
        state.register(commit(&s), WalletRef::ZERO).unwrap();
        let holds = state.prove_financial_impact(min, actual, &s).is_ok();
        prop_assert_eq!(holds, actual >= min);
        if holds && other <= min {
            prop_assert_eq!(state.prove_financial_impact(other, actual, &s), Ok(true));
        }
        if other > actual {
            prop_assert!(state.prove_financial_impact(other, actual, &s).is_err());
        }
    }

    #[test]
    fn witness_threshold_is_monotone(min in 0u64..=3_000_000, actual in 0u64..=3_000_000, lower in 0u64..=3_000_000) {
        let mut state = ProtocolState::new();
        let s = generate_secret();
        state.register(commit(&s), WalletRef::ZERO).unwrap();
        let holds = state.prove_witness_count(min, actual, &s).is_ok();
        prop_assert_eq!(holds, actual >= min);
        if holds && lower <= min {
            prop_assert_eq!(state.prove_witness_count(lower, actual, &s), Ok(true));
        }
    }

    #[test]
    fn second_filing_of_a_hash_is_duplicate(hash in any::<[u8; 32]>(), second_is_member in any::<bool>()) {
        let mut state = ProtocolState::new();
        let s1 = generate_secret();
        let s2 = generate_secret();
        state.register(commit(&s1), WalletRef::ZERO).unwrap();
        if second_is_member {
            state.register(commit(&s2), WalletRef::ZERO).unwrap();
        }
        let h = ReportHash::from_bytes(hash);
        state.submit_report(h, &s1).unwrap();
        prop_assert_eq!(state.submit_report(h, &s2), Err(ProtocolError::DuplicateReport));
    }

    #[test]
    fn ledger_record_is_independent_of_filer(hash in any::<[u8; 32]>(), prior in 0usize..4) {
        let s1 = generate_secret();
        let s2 = generate_secret();
        let mut base = ProtocolState::new();
        for _ in 0..prior {
            base.register(commit(&generate_secret()), WalletRef::ZERO).unwrap();
        }
        base.register(commit(&s1), WalletRef::from_bytes([1; 32])).unwrap();
        base.register(commit(&s2), WalletRef::from_bytes([2; 32])).unwrap();

        let snap = ProtocolSnapshot::capture(&base);
        let mut a = snap.clone().restore().unwrap();
        let mut b = snap.restore().unwrap();
        let h = ReportHash::from_bytes(hash);
        a.submit_report(h, &copy(&s1)).unwrap();
        b.submit_report(h, &copy(&s2)).unwrap();

        let ra = serde_json::to_string(&a.ledger().records()).unwrap();
        let rb = serde_json::to_string(&b.ledger().records()).unwrap();
        prop_assert_eq!(&ra, &rb);
        prop_assert!(!ra.contains(&commit(&s1).to_hex()));
        prop_assert!(!ra.contains(&commit(&s2).to_hex()));
    }
}
