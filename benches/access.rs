use bencher::{benchmark_group, benchmark_main, Bencher};

use columnar_vectors::{DoubleVector, IndexMapping, NullBitmap, NullableLongVector, ValueVector};

const ROWS: usize = 1 << 16;

fn dense_raw(bencher: &mut Bencher) {
    let vector = DoubleVector::new("d", (0 .. ROWS).map(|i| i as f64).collect());
    bencher.iter(|| bencher::black_box((0 .. ROWS).map(|i| vector.raw(i)).sum::<f64>()));
}
fn dense_doubles(bencher: &mut Bencher) {
    let vector = DoubleVector::new("d", (0 .. ROWS).map(|i| i as f64).collect());
    bencher.iter(|| bencher::black_box(vector.doubles().sum::<f64>()));
}
fn view_doubles(bencher: &mut Bencher) { _bench_view(bencher, IndexMapping::range(ROWS / 4 .. ROWS)); }
fn shuffled_doubles(bencher: &mut Bencher) { _bench_view(bencher, (0 .. ROWS).map(|i| (i * 7919) % ROWS).collect()); }

fn nullable_doubles(bencher: &mut Bencher) {
    let vector = _nullable();
    bencher.iter(|| bencher::black_box(vector.double_stream().sum::<f64>()));
}
fn nullable_boxed(bencher: &mut Bencher) {
    let vector = _nullable();
    bencher.iter(|| {
        for i in 0 .. ROWS {
            bencher::black_box(ValueVector::get(&vector, i));
        }
    });
}
fn nullable_select(bencher: &mut Bencher) {
    let vector = _nullable();
    let mapping = IndexMapping::from_mask(&(0 .. ROWS).map(|i| i % 5 != 0).collect::<Vec<_>>());
    bencher.iter(|| bencher::black_box(vector.select(&mapping).unwrap()));
}

fn _nullable() -> NullableLongVector {
    let nulls = NullBitmap::from_positions((0 .. ROWS).filter(|i| i % 3 == 0));
    NullableLongVector::new("l", (0 .. ROWS as i64).collect(), nulls)
}

fn _bench_view(bencher: &mut Bencher, mapping: IndexMapping) {
    let vector = DoubleVector::new("d", (0 .. ROWS).map(|i| i as f64).collect());
    let view = vector.with_view(&mapping).unwrap();
    bencher.iter(|| bencher::black_box(view.doubles().sum::<f64>()));
}

benchmark_group!(
    dense,
    dense_raw,
    dense_doubles,
    view_doubles,
    shuffled_doubles,
);

benchmark_group!(
    nullable,
    nullable_doubles,
    nullable_boxed,
    nullable_select,
);

benchmark_main!(dense, nullable);
