use criterion::{criterion_group, criterion_main, Criterion, black_box};
use rand::distr::Alphanumeric;
use rand::Rng;
use saltbloom_core::{DigestAlgorithm, HashFamily, HashFamilyConfig, HashFunction, MembershipFilter};

fn random_words(n: usize) -> Vec<String> {
    let mut rng = rand::rng();
    (0..n)
        .map(|_| (&mut rng).sample_iter(&Alphanumeric).take(12).map(char::from).collect())
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let words = random_words(10_000);
    for alg in [DigestAlgorithm::Md5, DigestAlgorithm::Sha256, DigestAlgorithm::Blake3] {
        let cfg = HashFamilyConfig::default().algorithm(alg.name()).function_count(5);
        let fam: HashFamily<str> = HashFamily::with_display(&cfg).unwrap();
        let h = fam.functions()[0].clone();
        c.bench_function(&format!("hash/{alg}"), |b| b.iter(|| black_box(h.hash(&words[0]).unwrap())));

        let filter = MembershipFilter::with_family(1 << 20, fam).unwrap();
        c.bench_function(&format!("insert/{alg}"), |b| {
            let mut i = 0usize;
            b.iter(|| {
                filter.insert(&words[i % words.len()]).unwrap();
                i += 1;
            })
        });
        c.bench_function(&format!("contains/{alg}"), |b| {
            let mut i = 0usize;
            b.iter(|| {
                let hit = filter.contains(&words[i % words.len()]).unwrap();
                i += 1;
                black_box(hit)
            })
        });
    }
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
