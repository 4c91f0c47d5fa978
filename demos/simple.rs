use compass_dial::{CompassReading, CompassView, CompassViewModel};
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Prints every reading the dial would animate to
struct ConsoleDial;

impl CompassView for ConsoleDial {
    fn on_reading(&mut self, reading: &CompassReading) {
        // this is where a renderer would spring-animate the dial
        println!(
            "{:>3}° {:<10} dial rotation {:>8.1}°",
            reading.rounded_heading(),
            reading.direction,
            reading.dial_rotation()
        );
    }
}

fn main() {
    env_logger::init();

    let mut view_model = CompassViewModel::new(ConsoleDial);
    let mut rng = Pcg32::seed_from_u64(2025);

    for _ in 0..10 {
        // replace with samples from a heading sensor when one is available
        if let Err(err) = view_model.simulate_random_heading(&mut rng) {
            eprintln!("sample dropped: {}", err);
        }
    }
}
