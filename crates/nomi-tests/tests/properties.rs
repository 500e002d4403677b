//! Property tests for statistics, ranking, and rule invariants.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use nomi_core::config::ScoreWeights;
use nomi_core::stats::{get_stats, scaled};
use nomi_core::types::Candidate;
use nomi_engine::checker::Checker;
use nomi_engine::partition::partition;
use nomi_engine::scoring::rank;
use nomi_engine::testing::{MockChain, candidate, pass_context};
use nomi_tests::helpers::{NOW, test_config};

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
        .block_on(fut)
}

fn arb_candidate() -> impl Strategy<Value = Candidate> {
    (
        0u128..1_000_000,
        0u32..10,
        0.0f64..1.0,
        0.0f64..1.0,
        0i64..500,
        0u64..10_000_000,
        prop::collection::vec(0u32..100, 0..5),
    )
        .prop_map(
            |(bonded, faults, inclusion, span_inclusion, rank, offline, unclaimed)| Candidate {
                bonded,
                faults,
                inclusion,
                span_inclusion,
                rank,
                offline_accumulated: offline,
                unclaimed_eras: unclaimed,
                ..candidate("c")
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn single_value_stats(x in -1.0e9f64..1.0e9) {
        let s = get_stats(&[x]);
        for v in [s.min, s.max, s.mean, s.median, s.p10, s.p25, s.p75, s.p90] {
            prop_assert_eq!(v, x);
        }
        prop_assert_eq!(s.std, 0.0);
    }

    #[test]
    fn scaled_hits_endpoints(pop in prop::collection::vec(-1.0e6f64..1.0e6, 2..50)) {
        let s = get_stats(&pop);
        prop_assume!(s.max > s.min);
        prop_assert_eq!(scaled(s.min, &pop), 0.0);
        prop_assert_eq!(scaled(s.max, &pop), 1.0);
    }

    #[test]
    fn scaled_degenerate_is_zero(x in -1.0e6f64..1.0e6, v in -1.0e6f64..1.0e6, n in 1usize..20) {
        prop_assert_eq!(scaled(v, &vec![x; n]), 0.0);
    }

    #[test]
    fn ranking_sorted_with_exact_aggregate(
        pop in prop::collection::vec(arb_candidate(), 0..40),
        seed in any::<u64>(),
    ) {
        let pop: Vec<Candidate> = pop
            .into_iter()
            .enumerate()
            .map(|(i, c)| Candidate { stash: format!("v{i}"), ..c })
            .collect();
        let mut rng = StdRng::seed_from_u64(seed);
        let (metadata, ranked) = rank(&pop, &ScoreWeights::default(), NOW, &mut rng);

        prop_assert_eq!(ranked.len(), pop.len());
        prop_assert_eq!(metadata.dimensions.len(), 9);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].total() >= pair[1].total());
        }
        for entry in &ranked {
            prop_assert!((entry.score.aggregate - entry.score.sub.sum()).abs() < 1e-9);
            prop_assert!(entry.score.aggregate >= 0.0);
            prop_assert!(entry.score.aggregate <= 125.0 + 1e-9);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn offline_candidates_always_invalid(
        never_online in any::<bool>(),
        offline_since in 1u64..NOW,
        base in arb_candidate(),
    ) {
        let mut c = base;
        if never_online {
            c.online_since = 0;
        } else {
            c.offline_since = offline_since;
        }
        let chain = MockChain::with_candidates(&[&c]);
        let cfg = test_config();

        let verdict = block_on(async {
            let ctx = pass_context(&chain, std::slice::from_ref(&c)).await;
            Checker::new(&cfg, &chain, None).check(&c, &ctx).await
        });
        let reason = verdict.reason().unwrap_or_default().to_string();
        prop_assert!(reason.contains("offline"), "{}", reason);
    }

    #[test]
    fn over_ceiling_commission_always_bad(
        commission in 50_000_001u32..=1_000_000_000,
        bonded in 0u128..10_000,
        staked in any::<bool>(),
        skip_self_stake in any::<bool>(),
        base in arb_candidate(),
    ) {
        let c = Candidate { skip_self_stake, ..base };
        let chain = MockChain::with_candidates(&[&c]);
        chain.account_mut("c", |a| {
            a.commission = commission;
            a.bonded = bonded;
            a.staked = staked;
        });
        let mut cfg = test_config();
        cfg.min_self_stake = 5_000;

        let result = block_on(async {
            partition(&Checker::new(&cfg, &chain, None), &[Some(c.clone())]).await
        });
        let p = result.unwrap();
        prop_assert!(p.good.is_empty());
        prop_assert!(p.bad["c"].reason.contains("commission"));
    }
}
