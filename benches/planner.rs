use athena::{Action, Agent, Actions, Condition, Effect, Goal, Goals, Planner};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Linear enabling chains: action N requires the flag set by action N-1.
fn chain_planning_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("goap_chain_planning");

    for chain_len in [5u16, 10, 20, 50].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(chain_len),
            chain_len,
            |b, &chain_len| {
                let mut actions = Actions::new();
                for i in 0..chain_len {
                    let mut action = Action::new(format!("advance_{i}"))
                        .with_cost(1.0)
                        .with_effect(Effect::set(i + 1, true));
                    if i > 0 {
                        action = action.with_precondition(Condition::eq(i, true));
                    }
                    actions.add(action);
                }

                let goals = Goals::new().with(
                    "reach_end",
                    Goal::fixed(1.0).with_condition(Condition::eq(chain_len, true)),
                );

                let mut agent = Agent::new(goals, actions);
                for key in 1..=chain_len {
                    agent.set_state(key, false);
                }

                let mut planner = Planner::new();
                b.iter(|| black_box(planner.plan(&agent, chain_len + 1)));
            },
        );
    }

    group.finish();
}

/// Numeric counting: long ADD chains stress fingerprint updates and the
/// open-set ordering rather than precondition checks.
fn counting_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("goap_numeric_counting");

    for target in [100i64, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(target), target, |b, &target| {
            let goals = Goals::new().with(
                "reach_target",
                Goal::fixed(1.0).with_condition(Condition::eq(1, target)),
            );
            let actions = Actions::new().with(
                Action::new("inc")
                    .with_cost(1.0)
                    .with_effect(Effect::add(1, 10i64)),
            );

            let mut agent = Agent::new(goals, actions);
            agent.set_state(1, 0i64);

            let mut planner = Planner::new();
            let depth = (target / 10) as u16 + 1;
            b.iter(|| black_box(planner.plan(&agent, depth)));
        });
    }

    group.finish();
}

/// Wide worlds: many irrelevant entries make entry lookup and world
/// cloning the dominant costs.
fn wide_world_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("goap_wide_world");

    for world_size in [16u16, 64, 256].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(world_size),
            world_size,
            |b, &world_size| {
                let mut rng = StdRng::seed_from_u64(7);

                let goals = Goals::new().with(
                    "flag_up",
                    Goal::fixed(1.0).with_condition(Condition::eq(0, true)),
                );
                let actions = Actions::new()
                    .with(
                        Action::new("raise_flag")
                            .with_cost(1.0)
                            .with_precondition(Condition::gt(1, 0i64))
                            .with_effect(Effect::set(0, true)),
                    )
                    .with(
                        Action::new("charge")
                            .with_cost(1.0)
                            .with_effect(Effect::add(1, 1i64)),
                    );

                let mut agent = Agent::new(goals, actions);
                agent.set_state(0, false);
                agent.set_state(1, 0i64);
                for key in 2..world_size {
                    agent.set_state(key, rng.gen_range(0i64..1000));
                }

                let mut planner = Planner::new();
                b.iter(|| black_box(planner.plan(&agent, 8)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    chain_planning_benchmark,
    counting_benchmark,
    wide_world_benchmark
);
criterion_main!(benches);
