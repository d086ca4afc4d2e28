use std::io::Write;

use criterion;
use seqcat::io::copy::copy_all;
use seqcat::util::buffer::AlignedBuf;
use seqcat::util::page_size;

fn bench_copy_throughput(c: &mut criterion::Criterion) {
    let data_size = 64 * 1024 * 1024;
    let data = (0..data_size).map(|i| (i % 251) as u8).collect::<Vec<_>>();

    let named_file = tempfile::NamedTempFile::new().expect("create NamedTempFile failed");
    let mut src = std::fs::File::create(named_file.path()).expect("create src file failed");
    src.write_all(&data).expect("write_all failed");
    src.sync_all().expect("sync_all failed");
    drop(src);

    let mut group = c.benchmark_group("throughput");
    group.throughput(criterion::Throughput::Bytes(data_size as u64));

    for chunk_size in [4 * 1024, 64 * 1024, 256 * 1024, 1024 * 1024] {
        group.bench_function(format!("chunk_{}k", chunk_size / 1024), |b| {
            b.iter(|| {
                let mut file =
                    std::fs::File::open(named_file.path()).expect("open src file failed");
                let mut buf =
                    AlignedBuf::new(chunk_size, page_size()).expect("aligned alloc failed");
                let mut sink = std::io::sink();
                let total =
                    copy_all(&mut file, &mut sink, &mut buf).expect("copy_all failed");
                assert_eq!(total, data_size as u64);
            })
        });
    }
    group.finish();
}

criterion::criterion_group!(benches, bench_copy_throughput);
criterion::criterion_main!(benches);
