//! Catalogue build benchmark.
//!
//! Measures a full build (filter, naming, schema translation) over action
//! lists of increasing size using Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mcp_action_bridge::registry::{ActionDescriptor, ActionRegistry, StaticActionRegistry};
use mcp_action_bridge::tools::CatalogueBuilder;
use mcp_action_bridge::Config;
use serde_json::json;
use std::sync::Arc;

fn synthetic_actions(count: usize) -> Vec<ActionDescriptor> {
    (0..count)
        .map(|i| {
            ActionDescriptor::new(format!("service{}.getItemById", i % 50)).with_params(json!({
                "id": "uuid",
                "filter": {"type": "object", "props": {"owner": "email", "since": "date"}},
                "tags": [{"type": "string", "optional": true}],
                "$$strict": true
            }))
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let config = Config::default();
    let sizes: &[usize] = &[10, 100, 1000];

    let mut group = c.benchmark_group("catalogue_build");
    for &size in sizes {
        let actions = synthetic_actions(size);
        let registry: Arc<dyn ActionRegistry> = Arc::new(StaticActionRegistry::new(actions.clone()));
        let builder = CatalogueBuilder::new(&config, registry);
        group.bench_with_input(BenchmarkId::from_parameter(size), &actions, |b, a| {
            b.iter(|| builder.build(black_box(a)).map(|c| c.len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
