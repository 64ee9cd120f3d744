use std::sync::Arc;
use std::time::Duration;

use holdover::{HoldOpenProvider, Holdover};

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), holdover::Error> {
    let provider = Arc::new(HoldOpenProvider::new());
    let holdover = Holdover::new(provider.clone());
    let guard = holdover.guard();

    // the host signaled a background transition
    let outcome = guard.register();
    println!("register: {outcome:?} (active: {})", outcome.is_active());

    let done = guard.completion();
    let flusher = std::thread::spawn(move || {
        // stand-in for flushing queued events
        std::thread::sleep(Duration::from_millis(200));
        done.finish();
    });

    let outcome = provider.hold(Duration::from_secs(5))?;
    println!("hold: {outcome:?}, active: {}", guard.is_active());

    flusher.join().ok();
    Ok(())
}
