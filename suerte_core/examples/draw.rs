use std::time::Duration;
use suerte_core::{ManualScheduler, Mounted, Picker, SeededSource};

fn main() {
    // Example end-to-end lucky draw on virtual time
    let scheduler = ManualScheduler::new();
    let rng = SeededSource::new("example-seed", "picker");
    let seed_hash = rng.seed_hash_hex();
    let mut draw = Mounted::new(Picker::default(), Box::new(rng), scheduler.clone());
    draw.edit(|p| {
        for name in ["Ana", "Luis", "Marta"] {
            let _ = p.add(name);
        }
    });
    draw.subscribe(|p: &Picker| {
        if let Some(h) = p.highlight() {
            println!("  ... {h}");
        }
    });
    if let Err(why) = draw.trigger() {
        println!("cannot draw: {why}");
        return;
    }
    scheduler.run_until_idle(Duration::from_secs(10));
    let view = draw.view();
    println!("seed_hash={} winner={:?} ticks={}", seed_hash, view.winner, view.ticks_elapsed);
}
