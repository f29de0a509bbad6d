use criterion::{black_box, criterion_group, criterion_main, Criterion};
use simulation::input::{Autopilot, InputSource};
use simulation::{init, Controls, Simulation};

const FLAT_SIM: &str = r#"{
    "Craft": {
        "X": 160,
        "Y": 20,
        "Fuel": 20,
        "Angle": -90
    },
    "Levels": [
        [[0,200],[320,200]]
    ]
}"#;

const ROUGH_SIM: &str = r#"{
    "World": {
        "Gravity": 9.82,
        "TickRate": 120
    },
    "Craft": {
        "X": 60,
        "Y": 10,
        "HSpeed": 8,
        "Fuel": 40
    },
    "Levels": [
        [[0,140],[30,185],[60,150],[100,192],[140,192],[180,170],[220,192],[260,192],[290,160],[320,180]]
    ]
}"#;

fn flat_sim() -> Simulation {
    init::json::parse_from_string(FLAT_SIM)
        .unwrap()
        .into_simulation()
        .unwrap()
}

fn rough_sim() -> Simulation {
    init::json::parse_from_string(ROUGH_SIM)
        .unwrap()
        .into_simulation()
        .unwrap()
}

fn step(sim: &mut Simulation) {
    let controls = Controls::idle().with_thrust(sim.craft().velocity.y > 4.);
    sim.step(&controls);
    sim.restart();
}

fn autopilot_descent(sim: &mut Simulation) {
    sim.reset();
    let mut pilot = Autopilot::default();
    for _ in 0..600 {
        let snapshot = pilot.poll(sim);
        sim.step(&snapshot.controls);
    }
}

pub fn run_benchmark(c: &mut Criterion) {
    let mut do_bench = |fun: fn(&mut Simulation), mut sim: Simulation, name| {
        c.bench_function(name, |b| b.iter(|| fun(black_box(&mut sim))));
    };
    macro_rules! bench {
        ($func:ident, $arg:ident) => {{
            let name = concat!(stringify!($func), "_", stringify!($arg));
            do_bench($func, $arg(), name);
        }};
    }

    bench!(step, flat_sim);
    bench!(step, rough_sim);
    bench!(autopilot_descent, flat_sim);
    bench!(autopilot_descent, rough_sim);
}

criterion_group!(benches, run_benchmark);
criterion_main!(benches);
