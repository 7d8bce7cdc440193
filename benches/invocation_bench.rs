use container_command::{CommandRunner, CommandSpec, ExecutionRequest, RunnerConfig};
use criterion::{Criterion, criterion_group, criterion_main};
use tokio::runtime::Runtime;

fn bench_invocation(c: &mut Criterion) {
    let runner = CommandRunner::default();
    let request = ExecutionRequest::new("myshop-test", "composer install --no-dev --optimize-autoloader")
        .unwrap()
        .with_user("www-data")
        .with_working_directory("/var/www/myshop/current");

    c.bench_function("invocation", |b| {
        b.iter(|| runner.invocation(&request));
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    // `true` ignores its arguments, so this measures spawn and capture only.
    let runner = CommandRunner::new(RunnerConfig {
        backend: "true".to_string(),
        timeout_secs: 10,
    });
    let request = ExecutionRequest::new(
        "bench",
        CommandSpec::Argv(vec!["echo".to_string(), "bench".to_string()]),
    )
    .unwrap();

    c.bench_function("dispatch", |b| {
        b.to_async(&rt).iter(|| async {
            let _ = runner.run(&request).await;
        });
    });
}

criterion_group!(benches, bench_invocation, bench_dispatch);
criterion_main!(benches);
