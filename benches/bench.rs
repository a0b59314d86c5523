use criterion::{
    criterion_group, 
    criterion_main, 
    Criterion, 
};

use buddypit::{Arena, ArenaConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn alloc_and_free(c: &mut Criterion) {
    let mut arena = Arena::new(ArenaConfig::default()).unwrap();
    arena.init().unwrap();

    c.bench_function("alloc free 24 bytes", |b| {
        b.iter(|| {
            let ptr = arena.alloc(24).unwrap().unwrap();
            arena.free(ptr).unwrap();
        });
    });

    c.bench_function("fill arena with 100 byte blocks", |b| {
        b.iter(|| {
            let mut ptrs = vec![];

            while let Some(ptr) = arena.alloc(100).unwrap() {
                ptrs.push(ptr);
            }

            for ptr in ptrs {
                arena.free(ptr).unwrap();
            }
        });
    });
}

fn mixed_sizes(c: &mut Criterion) {
    let mut arena = Arena::new(ArenaConfig::default()).unwrap();

    c.bench_function("mixed sizes with reallocs", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(1115438165);
            let mut ptrs = vec![];

            for _ in 0..100 {
                let size = rng.gen_range(1..1600);

                if let Some(ptr) = arena.alloc(size).unwrap() {
                    ptrs.push(ptr);
                }
            }

            for ptr in ptrs.iter_mut() {
                let size = rng.gen_range(1..1600);

                if let Some(new_ptr) = arena.realloc(*ptr, size).unwrap() {
                    *ptr = new_ptr;
                }
            }

            for ptr in ptrs {
                arena.free(ptr).unwrap();
            }
        });
    });
}

criterion_group!(benches, alloc_and_free, mixed_sizes);
criterion_main!(benches);
