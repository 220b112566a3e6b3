// Deterministic sample inputs shared by the integration tests.

#![allow(dead_code)]

const WORDS: &[&str] = &[
    "block", "stream", "literal", "match", "offset", "length", "token", "marker", "chunk",
    "window", "decode", "header", "region", "buffer", "copy", "the", "of", "and", "a",
];

/// xorshift64* so tests never depend on a RNG crate's sequence.
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    pub fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

/// Word salad: compresses well with short and medium distances.
pub fn text(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(len + 16);
    while out.len() < len {
        out.extend_from_slice(WORDS[rng.below(WORDS.len())].as_bytes());
        out.push(if rng.below(12) == 0 { b'\n' } else { b' ' });
    }
    out.truncate(len);
    out
}

/// Incompressible bytes.
pub fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = Rng::new(seed);
    (0..len).map(|_| rng.next_u64() as u8).collect()
}

/// Long single-byte runs separated by short noise: exercises overlapping
/// matches and long length extensions.
pub fn runs(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(len + 1024);
    while out.len() < len {
        let b = rng.next_u64() as u8;
        let n = 1 + rng.below(900);
        out.extend(std::iter::repeat(b).take(n));
        out.extend_from_slice(&noise(rng.below(6), rng.next_u64()));
    }
    out.truncate(len);
    out
}

/// Noise repeated at a distance of `period`: forces matches that reach far
/// back into the output.
pub fn far_repeats(len: usize, period: usize, seed: u64) -> Vec<u8> {
    let unit = noise(period, seed);
    unit.iter().copied().cycle().take(len).collect()
}

/// All sample inputs, labelled for assertion messages.
pub fn samples() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("empty", Vec::new()),
        ("one byte", vec![b'x']),
        ("short text", b"abcabcabcabc".to_vec()),
        ("text 4K", text(4 * 1024, 1)),
        ("text 200K", text(200 * 1024, 2)),
        ("noise 3K", noise(3000, 3)),
        ("runs 100K", runs(100 * 1024, 4)),
        ("zeros 70K", vec![0u8; 70_000]),
        ("far repeats M3", far_repeats(60_000, 9_000, 5)),
        ("far repeats M4", far_repeats(150_000, 30_000, 6)),
    ]
}
