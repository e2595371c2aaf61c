use std::hint::black_box;
use std::sync::Arc;

use biodockviz::scene::bonds::build_bond_segments;
use biodockviz::scene::instancer::{build_instances, AtomInstancer};
use biodockviz::state::{ColorScheme, ViewMode, VisualizationState};
use biodockviz::structure::{Atom, Bond, BondType, StructureData};
use criterion::{criterion_group, criterion_main, Criterion};

const ELEMENTS: [&str; 6] = ["C", "N", "O", "S", "H", "FE"];
const RESIDUES: [&str; 4] = ["ALA", "GLY", "LYS", "ASP"];

fn synthetic(count: usize) -> StructureData {
    let atoms = (0..count)
        .map(|i| {
            let t = i as f32 * 0.1;
            Atom {
                index: i,
                serial: i as i64 + 1,
                name: "CA".to_owned(),
                alt_loc: String::new(),
                res_name: RESIDUES[i % RESIDUES.len()].to_owned(),
                chain_id: ["A", "B", "C"][i % 3].to_owned(),
                res_seq: (i / 8) as i64,
                i_code: String::new(),
                x: t.cos() * 20.0,
                y: t.sin() * 20.0,
                z: t * 0.05,
                occupancy: 1.0,
                temp_factor: 0.0,
                element: ELEMENTS[i % ELEMENTS.len()].to_owned(),
                charge: 0.0,
            }
        })
        .collect();
    StructureData {
        id: "bench".to_owned(),
        atoms,
        ..StructureData::default()
    }
}

fn instancing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_instances");
    for count in [1_000, 10_000, 50_000] {
        let structure = synthetic(count);
        let hidden: Vec<usize> = (0..count).step_by(7).collect();
        let mut out = Vec::with_capacity(count);
        for scheme in [ColorScheme::Element, ColorScheme::Chain] {
            group.bench_function(format!("{count}_atoms_{scheme:?}"), |b| {
                b.iter(|| {
                    build_instances(
                        black_box(&structure),
                        ViewMode::BallAndStick,
                        scheme,
                        &hidden,
                        &mut out,
                    );
                    black_box(out.len())
                });
            });
        }
    }
    group.finish();
}

fn memo_hit_benchmark(c: &mut Criterion) {
    let structure = Arc::new(synthetic(50_000));
    let state = VisualizationState::default();
    let mut instancer = AtomInstancer::new();
    let _ = instancer.instances(&structure, &state);

    c.bench_function("instances_unchanged_50000", |b| {
        b.iter(|| black_box(instancer.instances(&structure, &state).len()));
    });
}

fn bond_benchmark(c: &mut Criterion) {
    let mut structure = synthetic(50_000);
    structure.bonds = Some(
        (1..structure.atoms.len())
            .map(|i| Bond {
                atom1_index: i - 1,
                atom2_index: i,
                bond_type: BondType::Single,
                order: 1,
                distance: 1.5,
            })
            .collect(),
    );
    let mut out = Vec::new();
    c.bench_function("bond_segments_50000", |b| {
        b.iter(|| {
            build_bond_segments(black_box(&structure), &[], &mut out);
            black_box(out.len())
        });
    });
}

criterion_group!(benches, instancing_benchmark, memo_hit_benchmark, bond_benchmark);
criterion_main!(benches);
