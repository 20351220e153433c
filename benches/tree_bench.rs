// benches/tree_bench.rs
//! Benchmarks for listing parsing and doc-tree assembly.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use leafpad::{build_tree, parse_item_page, Item};
use serde_json::{json, Value};

fn create_sample_item_json(id: u64, parent_id: Option<u64>) -> Value {
    json!({
        "id": id,
        "name": format!("Section {}", id),
        "slug": format!("section-{}", id),
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z",
        "published": true,
        "parentId": parent_id,
        "hasChildren": false,
        "seo": { "title": format!("Section {}", id), "description": null },
        "tags": [{ "id": 1, "name": "docs" }],
        "organization": { "id": "org_1", "name": "Acme", "slug": "acme" },
        "createdByUser": { "name": "Ada", "image": null }
    })
}

/// A listing where every item hangs under one of the `fanout` items
/// before it, giving a bushy tree a few levels deep.
fn create_sample_listing_json(count: u64, fanout: u64) -> Value {
    let items: Vec<Value> = (1..=count)
        .map(|id| {
            let parent = if id <= fanout { None } else { Some((id - 1) / fanout) };
            create_sample_item_json(id, parent)
        })
        .collect();

    json!({
        "posts": items,
        "pagination": {
            "page": 1,
            "limit": count,
            "totalCount": count,
            "totalPages": 1,
            "hasNext": false,
            "hasPrev": false
        },
        "organization": { "id": "org_1", "name": "Acme", "slug": "acme" }
    })
}

fn bench_listing_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("listing_parsing");

    for (count, name) in [(10, "small"), (50, "medium"), (500, "large")] {
        let listing = create_sample_listing_json(count, 4);
        group.bench_with_input(
            BenchmarkId::new("parse_item_page", name),
            &listing,
            |b, listing| {
                b.iter(|| parse_item_page(black_box(listing.clone())));
            },
        );
    }

    group.finish();
}

fn bench_tree_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_assembly");

    for (count, name) in [(10, "small"), (50, "medium"), (500, "large"), (5000, "huge")] {
        let items: Vec<Item> = parse_item_page(create_sample_listing_json(count, 4))
            .map(|page| page.items)
            .unwrap_or_default();

        group.bench_with_input(BenchmarkId::new("build_tree", name), &items, |b, items| {
            b.iter(|| build_tree(black_box(items), "/docs"));
        });

        // Deepest shape: a single chain.
        let chain: Vec<Item> = parse_item_page(create_sample_listing_json(count, 1))
            .map(|page| page.items)
            .unwrap_or_default();
        group.bench_with_input(BenchmarkId::new("build_tree_chain", name), &chain, |b, chain| {
            b.iter(|| build_tree(black_box(chain), "/docs"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_listing_parsing, bench_tree_assembly);
criterion_main!(benches);
