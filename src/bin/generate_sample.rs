use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// One synthetic motion: a noisy sinusoid with its own phase and tempo.
struct Motion {
    name: &'static str,
    frames: usize,
    tempo: f64,
    phase: f64,
}

fn sample_motion(motion: &Motion, rng: &mut SimpleRng) -> Vec<f64> {
    (0..motion.frames)
        .map(|i| {
            let t = i as f64 / motion.frames as f64;
            (2.0 * std::f64::consts::PI * motion.tempo * t + motion.phase).sin() + rng.gauss(0.0, 0.05)
        })
        .collect()
}

/// Absolute difference between every pair of frames.
fn distance_matrix(a: &[f64], b: &[f64]) -> Vec<Vec<f64>> {
    a.iter()
        .map(|&va| b.iter().map(|&vb| (va - vb).abs()).collect())
        .collect()
}

/// Cheapest monotone path from (0, 0) to the far corner, DTW style.
fn warping_path(cost: &[Vec<f64>]) -> Vec<(usize, usize)> {
    let n = cost.len();
    let m = cost[0].len();
    let mut acc = vec![vec![f64::INFINITY; m]; n];
    for i in 0..n {
        for j in 0..m {
            let best = match (i, j) {
                (0, 0) => 0.0,
                (0, _) => acc[0][j - 1],
                (_, 0) => acc[i - 1][0],
                _ => acc[i - 1][j - 1].min(acc[i - 1][j]).min(acc[i][j - 1]),
            };
            acc[i][j] = cost[i][j] + best;
        }
    }

    let (mut i, mut j) = (n - 1, m - 1);
    let mut path = vec![(i, j)];
    while i > 0 || j > 0 {
        (i, j) = match (i, j) {
            (0, _) => (0, j - 1),
            (_, 0) => (i - 1, 0),
            _ => {
                let diag = acc[i - 1][j - 1];
                let up = acc[i - 1][j];
                let left = acc[i][j - 1];
                if diag <= up && diag <= left {
                    (i - 1, j - 1)
                } else if up <= left {
                    (i - 1, j)
                } else {
                    (i, j - 1)
                }
            }
        };
        path.push((i, j));
    }
    path.reverse();
    path
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn write_pair(dir: &Path, stem: &str, suffixes: (&str, &str), a: &[f64], b: &[f64]) -> Result<()> {
    let matrix = distance_matrix(a, b);
    let path = warping_path(&matrix);

    let mut matrix_text = String::new();
    for row in &matrix {
        let line: Vec<String> = row.iter().map(|v| format!("{v:.6}")).collect();
        writeln!(matrix_text, "{}", line.join(" "))?;
    }
    let mut marks_text = String::new();
    for (i, j) in &path {
        writeln!(marks_text, "{i} {j}")?;
    }

    let matrix_path = dir.join(format!("{stem}{}", suffixes.0));
    let marks_path = dir.join(format!("{stem}{}", suffixes.1));
    std::fs::write(&matrix_path, matrix_text)
        .with_context(|| format!("writing {}", matrix_path.display()))?;
    std::fs::write(&marks_path, marks_text)
        .with_context(|| format!("writing {}", marks_path.display()))?;

    println!(
        "Wrote {}x{} heatmap and {} reference marks for {stem}",
        a.len(),
        b.len(),
        path.len()
    );
    Ok(())
}

/// Usage: `generate_sample [<folder>] [--txt]`
fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let suffixed = args.iter().any(|a| a == "--txt");
    let dir = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_motions"));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let suffixes = if suffixed {
        ("__heatmap.txt", "__refFrames.txt")
    } else {
        (".hm", ".ref")
    };

    let mut rng = SimpleRng::new(42);
    let motions = [
        Motion { name: "walk", frames: 120, tempo: 2.0, phase: 0.0 },
        Motion { name: "jog", frames: 90, tempo: 2.0, phase: 0.4 },
        Motion { name: "march", frames: 150, tempo: 3.0, phase: 1.1 },
    ];
    let samples: Vec<Vec<f64>> = motions.iter().map(|m| sample_motion(m, &mut rng)).collect();

    for (i, first) in motions.iter().enumerate() {
        for (j, second) in motions.iter().enumerate().skip(i + 1) {
            let stem = format!("{}_{}", first.name, second.name);
            write_pair(&dir, &stem, suffixes, &samples[i], &samples[j])?;
        }
    }

    println!("Sample pairs written to {}", dir.display());
    Ok(())
}
