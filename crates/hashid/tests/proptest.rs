use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hashid::client::{HashIdClient, IdClient};
use hashid::error::IdError;
use hashid::id;
use hashid::observed::ObservedIds;
use hashid::retry::RETRY_LIMIT;
use hashid::types::MutationKey;
use hashid::validate::{ShapeValidator, Validator};
use proptest::prelude::*;

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof!["[a-zA-Z0-9_-]{1,24}", "[^:]{1,12}"]
}

fn arb_keys() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(arb_key(), 1..7)
}

fn refs(keys: &[String]) -> Vec<&str> {
    keys.iter().map(String::as_str).collect()
}

// ---------------------------------------------------------------------------
// 1. Digest derivation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn derive_is_deterministic(keys in arb_keys()) {
        let a = id::derive(&refs(&keys));
        let b = id::derive(&refs(&keys));
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), 32);
        prop_assert!(a.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn distinct_tuples_give_distinct_digests(a in arb_keys(), b in arb_keys()) {
        prop_assume!(a != b);
        prop_assert_ne!(id::derive(&refs(&a)), id::derive(&refs(&b)));
    }

    #[test]
    fn swapping_two_different_keys_changes_digest(
        keys in proptest::collection::vec(arb_key(), 2..7),
        i in 0..7usize,
        j in 0..7usize,
    ) {
        let (i, j) = (i % keys.len(), j % keys.len());
        prop_assume!(keys[i] != keys[j]);
        let mut swapped = keys.clone();
        swapped.swap(i, j);
        prop_assert_ne!(id::derive(&refs(&keys)), id::derive(&refs(&swapped)));
    }
}

// ---------------------------------------------------------------------------
// 2. Client-level identifiers
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn donor_id_is_prefix_plus_digest(donor in arb_key(), project in arb_key()) {
        let client = HashIdClient::new();
        let issued = client.create_donor_id(&donor, &project).unwrap();
        prop_assert!(issued.starts_with("DO"));
        prop_assert_eq!(&issued[2..], id::derive(&[donor.as_str(), project.as_str()]));
    }

    #[test]
    fn separate_clients_agree(submitted in arb_key(), project in arb_key()) {
        let a = HashIdClient::new();
        let b = HashIdClient::persistent();
        prop_assert_eq!(
            a.create_sample_id(&submitted, &project).unwrap(),
            b.create_sample_id(&submitted, &project).unwrap()
        );
        prop_assert_eq!(
            a.create_file_id(&submitted, &project).unwrap(),
            b.create_file_id(&submitted, &project).unwrap()
        );
    }

    #[test]
    fn object_id_is_stable_uuid(analysis in "[A-Za-z0-9-]{1,36}", file in "[a-z]{1,12}\\.[a-z]{1,4}") {
        let client = HashIdClient::new();
        let a = client.create_object_id(&analysis, &file).unwrap();
        prop_assert!(ShapeValidator.validate_uuid(&a).is_ok());
        prop_assert_eq!(&a, &client.create_object_id(&analysis, &file).unwrap());

        let other = format!("{file}.bak");
        prop_assert_ne!(a, client.create_object_id(&analysis, &other).unwrap());
    }

    #[test]
    fn mutation_fields_are_positional(parts in proptest::collection::vec(arb_key(), 6)) {
        prop_assume!(parts[0] != parts[4]);
        let client = HashIdClient::new();
        let key = MutationKey::new(&parts[0], &parts[1], &parts[2], &parts[3], &parts[4], &parts[5]);
        let swapped = MutationKey::new(&parts[4], &parts[1], &parts[2], &parts[3], &parts[0], &parts[5]);
        prop_assert_ne!(
            client.create_mutation_id(&key).unwrap(),
            client.create_mutation_id(&swapped).unwrap()
        );
    }
}

// ---------------------------------------------------------------------------
// 3. Analysis ids and the observation set
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn lookup_finds_created_ids_only_when_persistent(
        ids in proptest::collection::vec("[A-Za-z0-9._:-]{1,40}", 1..20),
        persist in any::<bool>(),
    ) {
        let client = if persist { HashIdClient::persistent() } else { HashIdClient::new() };
        for submitted in &ids {
            prop_assert_eq!(&client.create_analysis_id(submitted).unwrap(), submitted);
        }
        for submitted in &ids {
            let found = client.get_analysis_id(submitted).unwrap();
            prop_assert_eq!(found.is_some(), persist);
        }
    }

    #[test]
    fn rejected_ids_leave_set_untouched(bad in prop_oneof![Just(String::new()), "[ /#?]{1,10}"]) {
        let client = HashIdClient::persistent();
        prop_assert!(client.create_analysis_id(&bad).is_err());
        prop_assert_eq!(client.observed_count(), 0);
    }

    #[test]
    fn allocator_stops_at_first_fresh_candidate(taken in 0..RETRY_LIMIT) {
        let seeded: ObservedIds = (0..taken).map(|i| format!("00000000-0000-7000-8000-{i:012x}")).collect();
        let draws = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&draws);
        let client = HashIdClient::with_observed(Arc::new(seeded), true).with_source(move || {
            let i = counter.fetch_add(1, Ordering::SeqCst);
            format!("00000000-0000-7000-8000-{i:012x}")
        });

        let issued = client.generate_unique_analysis_id().unwrap();
        prop_assert_eq!(issued, format!("00000000-0000-7000-8000-{taken:012x}"));
        prop_assert_eq!(draws.load(Ordering::SeqCst), taken + 1);
    }
}

#[test]
fn allocator_gives_up_after_retry_limit() {
    let seeded: ObservedIds = (0..10)
        .map(|i| format!("00000000-0000-7000-8000-{i:012x}"))
        .collect();
    let draws = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&draws);
    let client = HashIdClient::with_observed(Arc::new(seeded), false).with_source(move || {
        let i = counter.fetch_add(1, Ordering::SeqCst) % 10;
        format!("00000000-0000-7000-8000-{i:012x}")
    });

    let err = client.generate_unique_analysis_id().unwrap_err();
    assert_eq!(err, IdError::RetryExhausted { limit: 1000 });
    assert!(err.to_string().contains("1000"));
    assert_eq!(draws.load(Ordering::SeqCst), 1000);
}
