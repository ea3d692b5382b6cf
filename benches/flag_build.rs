//! Benchmark for the flag-building hot path.
//!
//! Unit-file generation runs once per container per catalog compile, so
//! the interesting cost is a fully-populated option set.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use runflags::{build, OptionSet};

fn full_option_set() -> OptionSet {
    OptionSet::new()
        .with("username", "app")
        .with("hostname", "web-01")
        .with("restart", "always")
        .with("memory_limit", "512m")
        .with("cpuset", vec!["0", "1", "2", "3"])
        .with("privileged", true)
        .with("tty", true)
        .with("read_only", true)
        .with("dns", vec!["8.8.8.8", "8.8.4.4"])
        .with("dns_search", vec!["example.com"])
        .with("expose", vec!["8080", "8443"])
        .with("links", vec!["db:db", "cache:cache"])
        .with("volumes_from", vec!["data"])
        .with("env", vec!["FOO=bar", "BAZ=qux", "QUUX=1"])
        .with("env_file", vec!["/etc/app.env"])
        .with("ports", vec!["80:80", "443:443"])
        .with("labels", vec!["tier=web", "team=platform"])
        .with("hostentries", vec!["db:10.0.0.2"])
        .with("volumes", vec!["/srv/app:/app", "/var/log/app:/log"])
        .with("extra_params", vec!["--cap-add=SYS_ADMIN", "--rm"])
}

fn minimal_option_set() -> OptionSet {
    OptionSet::new()
        .with("username", "app")
        .with("extra_params", Vec::<&str>::new())
}

fn bench_build(c: &mut Criterion) {
    let full = full_option_set();
    let minimal = minimal_option_set();

    c.bench_function("build_full", |b| {
        b.iter(|| build(black_box(&full)).unwrap())
    });

    c.bench_function("build_minimal", |b| {
        b.iter(|| build(black_box(&minimal)).unwrap())
    });
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
