//! Post-run statistics printed by the CLI.

use std::fmt::Write as _;
use std::time::Duration;

use crate::stat::Stat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

impl Direction {
    fn arrow(self) -> &'static str {
        match self {
            Direction::Encode => "=>",
            Direction::Decode => "<=",
        }
    }
}

/// Multi-line summary: sizes, ratio, throughput, and wall time.
///
/// Speed is measured over the uncompressed side in both directions.
pub fn format_statistics(stat: &Stat, direction: Direction, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    let (plain, packed) = match direction {
        Direction::Encode => (stat.source_size, stat.target_size),
        Direction::Decode => (stat.target_size, stat.source_size),
    };
    let ratio = if plain == 0 {
        0.0
    } else {
        packed as f64 * 100.0 / plain as f64
    };
    let mbps = if secs > 0.0 {
        plain as f64 * 1e-6 / secs
    } else {
        0.0
    };

    let mut s = String::new();
    let _ = writeln!(s, "statistics:");
    let _ = writeln!(
        s,
        "  size:  {} bytes {} {} bytes",
        plain,
        direction.arrow(),
        packed
    );
    let _ = writeln!(s, "  ratio: {:.2}%", ratio);
    let _ = writeln!(s, "  speed: {:.3} MB/s", mbps);
    let _ = writeln!(s, "  time:  {:.3} sec", secs);
    s
}
