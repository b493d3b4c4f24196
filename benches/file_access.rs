use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fastfs::{normalize, open_line_source, read_whole_file, LineSourceOptions};
use std::io::Write;
use tempfile::NamedTempFile;

fn create_test_file(size_kb: usize) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let target_size = size_kb * 1024;
    let mut current_size = 0;
    let mut line_num = 0;

    while current_size < target_size {
        let line = format!("/usr/lib/python3/site-packages/pkg_{}/module_{}.py\n",
                           line_num % 97, line_num);
        temp_file.write_all(line.as_bytes()).unwrap();
        current_size += line.len();
        line_num += 1;
    }

    temp_file.flush().unwrap();
    temp_file
}

fn size_label(size_kb: usize) -> String {
    if size_kb < 1024 {
        format!("{}KB", size_kb)
    } else {
        format!("{}MB", size_kb / 1024)
    }
}

fn bench_whole_file_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_whole_file");
    group.sample_size(20);

    for &size_kb in &[4, 64, 4096] {
        let temp_file = create_test_file(size_kb);
        group.bench_with_input(
            BenchmarkId::from_parameter(size_label(size_kb)),
            &temp_file.path(),
            |b, path| {
                b.iter(|| black_box(read_whole_file(path, false).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_line_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_iteration");
    group.sample_size(20);

    // 8KB stays buffered under the default threshold; the rest are mapped.
    for &size_kb in &[8, 64, 4096] {
        let temp_file = create_test_file(size_kb);
        let label = size_label(size_kb);

        group.bench_with_input(BenchmarkId::new("default", &label), &temp_file.path(), |b, path| {
            b.iter(|| {
                let mut source = open_line_source(path, &LineSourceOptions::new())
                    .unwrap()
                    .into_source()
                    .unwrap();
                black_box(source.lines().count())
            });
        });

        group.bench_with_input(BenchmarkId::new("forced_mmap", &label), &temp_file.path(), |b, path| {
            let options = LineSourceOptions::new().mmap_threshold(0);
            b.iter(|| {
                let mut source = open_line_source(path, &options).unwrap().into_source().unwrap();
                black_box(source.lines().count())
            });
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let paths = [
        "/usr/lib/../lib64/./python3//site-packages/",
        "a/b/c/../../d/./e/f/../../../g",
        "../../x/y/z",
    ];
    c.bench_function("normalize", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(normalize(black_box(path)));
            }
        });
    });
}

criterion_group!(benches, bench_whole_file_read, bench_line_iteration, bench_normalize);
criterion_main!(benches);
