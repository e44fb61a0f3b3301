use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use homestock_core::ItemId;
use homestock_infra::InventoryService;
use homestock_inventory::{NewAisle, NewItem, PlacementRequest};

const LOCATIONS: [&str; 4] = ["Pantry", "Refrigerator", "Freezer", "Garage"];

/// A household with `items` items spread over four locations and two stores.
fn household(items: usize) -> InventoryService {
    let svc = InventoryService::in_memory();
    let stores = [
        svc.create_store("Costco").unwrap().id,
        svc.create_store("Walmart").unwrap().id,
    ];
    let aisles: Vec<_> = (0..6)
        .map(|i| {
            svc.create_aisle(NewAisle {
                name: format!("A{i}"),
                store_id: stores[i % stores.len()],
            })
            .unwrap()
            .id
        })
        .collect();

    for i in 0..items {
        let requests = [
            PlacementRequest::new(LOCATIONS[i % LOCATIONS.len()], (i % 7) as i64),
            PlacementRequest::new(LOCATIONS[(i + 1) % LOCATIONS.len()], (i % 3) as i64),
        ];
        svc.create_item(
            NewItem {
                aisle_id: (i % 5 != 0).then(|| aisles[i % aisles.len()]),
                ..NewItem::named(format!("Item {i}"))
            },
            Some(&requests),
        )
        .unwrap();
    }
    svc
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_engine");

    for size in [100usize, 1_000, 5_000] {
        let svc = household(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("low_stock", size), &svc, |b, svc| {
            b.iter(|| black_box(svc.low_stock(black_box(3)).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("shopping_list", size), &svc, |b, svc| {
            b.iter(|| black_box(svc.shopping_list(black_box(3), None).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("records_at_location", size), &svc, |b, svc| {
            let pantry = svc.create_location("Pantry").unwrap().value.id;
            b.iter(|| black_box(svc.records_at_location(pantry).unwrap()))
        });
    }

    group.finish();
}

fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation_api");

    for size in [100usize, 1_000] {
        let svc = household(size);
        let item = ItemId::new(1);
        let mut flip = false;

        group.bench_with_input(BenchmarkId::new("save_item_placements", size), &svc, |b, svc| {
            b.iter(|| {
                flip = !flip;
                let requests = if flip {
                    vec![PlacementRequest::new("Pantry", 3), PlacementRequest::new("Freezer", 2)]
                } else {
                    vec![PlacementRequest::new("pantry", 5)]
                };
                black_box(svc.save_item_placements(item, &requests).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_queries, bench_mutations);
criterion_main!(benches);
