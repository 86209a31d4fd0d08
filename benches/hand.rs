use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng};
use rs_plo::arena::agent::{CallingAgent, RandomAgent};
use rs_plo::arena::{Agent, HandSimulationBuilder, HandState, Seats, TableConfig};
use rs_plo::core::{Card, Deck};
use rs_plo::omaha::{HandRanker, OmahaRanker};

fn run_random_hand(seed: u64, stack: u32) -> HandState {
    let mut deck = Deck::new();
    deck.shuffle_with_rng(&mut StdRng::seed_from_u64(seed));

    let agents: Seats<Box<dyn Agent>> = Seats::new(
        Box::new(RandomAgent::new_with_seed(
            "oop",
            vec![0.1, 0.2, 0.3],
            vec![0.5, 0.5, 0.5],
            seed,
        )),
        Box::new(RandomAgent::new_with_seed(
            "ip",
            vec![0.1, 0.2, 0.3],
            vec![0.5, 0.5, 0.5],
            seed + 1,
        )),
    );

    let mut sim = HandSimulationBuilder::default()
        .table_config(TableConfig {
            starting_stacks: Seats::new(stack, stack),
            ..TableConfig::default()
        })
        .agents(agents)
        .deck(deck)
        .build()
        .unwrap();
    sim.run().unwrap();
    sim.game_state
}

fn run_check_down() -> HandState {
    let mut sim = HandSimulationBuilder::default()
        .table_config(TableConfig::default())
        .agents(Seats::new(
            Box::<CallingAgent>::default(),
            Box::<CallingAgent>::default(),
        ))
        .build()
        .unwrap();
    sim.run().unwrap();
    sim.game_state
}

fn bench_random_hands(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_hand");

    for stack in [20, 200, 2_000] {
        group.bench_with_input(BenchmarkId::new("stack", stack), &stack, |b, &stack| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                run_random_hand(seed, stack)
            });
        });
    }

    group.finish();
}

fn bench_check_down(c: &mut Criterion) {
    c.bench_function("check_down", |b| b.iter(run_check_down));
}

fn bench_omaha_rank(c: &mut Criterion) {
    let board: [Card; 5] = Card::parse_many("AsKsQs2d3c")
        .unwrap()
        .try_into()
        .unwrap();
    let hole: [Card; 4] = Card::parse_many("Js9s4h4d").unwrap().try_into().unwrap();
    let ranker = OmahaRanker;

    c.bench_function("omaha_rank", |b| b.iter(|| ranker.rank(&board, &hole)));
}

criterion_group!(
    benches,
    bench_random_hands,
    bench_check_down,
    bench_omaha_rank
);
criterion_main!(benches);
