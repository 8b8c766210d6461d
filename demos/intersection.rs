//! Runs a two-axis intersection for a few simulated minutes.
//!
//! ```sh
//! RUST_LOG=junction=debug cargo run --example intersection
//! ```

use junction::coordinator::{Axis, Intersection, IntersectionConfig};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = IntersectionConfig {
        green_secs: 8.0,
        yellow_secs: 2.0,
        all_red_secs: 1.0,
        ..IntersectionConfig::default()
    };
    let mut intersection = Intersection::new(config)?;
    intersection.start()?;

    let step = Duration::from_millis(500);
    for tick in 0..120 {
        intersection.tick(step)?;
        if tick == 80 {
            println!("-- emergency --");
            intersection.emergency()?;
        }
        if tick == 90 {
            println!("-- cleared --");
            intersection.clear()?;
        }
        if tick % 4 == 0 {
            println!(
                "t={:>5.1}s  NS={:<12} EW={:<12}",
                (tick + 1) as f64 * step.as_secs_f64(),
                format!("{:?}", intersection.signal(Axis::NorthSouth)?),
                format!("{:?}", intersection.signal(Axis::EastWest)?),
            );
        }
    }

    for axis in Axis::ALL {
        let names = intersection.machine(axis).history_names();
        println!("{axis}: {} visits, last {:?}", names.len(), names.last());
    }
    Ok(())
}
