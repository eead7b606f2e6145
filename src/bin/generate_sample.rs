use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// One synthetic trip, in the column layout the dashboard reads.
#[derive(Serialize)]
struct TripRow {
    trip_id: u32,
    transportation: &'static str,
    start_time: u32,
    ladybug_total_duration: Option<f64>,
    foot_total_duration: Option<f64>,
    origin: &'static str,
    destination: &'static str,
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const STOPS: [&str; 6] = [
    "Main Gate",
    "Library",
    "Engineering Hall",
    "Dormitory",
    "Student Union",
    "Sports Center",
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let trips = 600;

    let output_path = Path::new("data/ladybug_final.csv");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir).context("creating output directory")?;
    }
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;

    for trip_id in 0..trips {
        // Class changes cluster trips around the top of each hour, 9:00–18:00.
        let hour = 9.0 + (rng.next_f64() * 9.0).floor();
        let start = (hour * 60.0 + rng.gauss(5.0, 12.0)).clamp(8.0 * 60.0, 19.0 * 60.0 - 1.0);

        let walk = rng.gauss(18.0, 6.0).max(3.0);
        let ride = (walk * 5.0 / 17.0 + rng.gauss(2.0, 1.0)).max(1.0);
        let (transportation, ladybug, foot) = if rng.next_f64() < 0.4 {
            ("ladybug", Some(round1(ride)), None)
        } else {
            ("foot", None, Some(round1(walk)))
        };

        let origin = rng.pick(&STOPS);
        let destination = rng.pick(&STOPS);
        writer
            .serialize(TripRow {
                trip_id,
                transportation,
                start_time: start as u32,
                ladybug_total_duration: ladybug,
                foot_total_duration: foot,
                origin,
                destination,
            })
            .with_context(|| format!("writing trip {trip_id}"))?;
    }
    writer.flush().context("flushing output file")?;

    println!("Wrote {trips} trips to {}", output_path.display());
    Ok(())
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
