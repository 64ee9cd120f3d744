use std::sync::Arc;
use std::time::Duration;

use holdover::{AppEvent, HoldOpenProvider, Holdover, HoldoverOptions};

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), holdover::Error> {
    let provider = Arc::new(HoldOpenProvider::new());
    let mut opts = HoldoverOptions::default();
    opts.app_version = Some("1.2.0".to_string());
    opts.previous_app_version = Some("1.1.0".to_string());
    opts.session_timeout = Duration::from_secs(30);
    let holdover = Holdover::with_options(provider.clone(), opts)?;
    let lifecycle = holdover.lifecycle();

    for transition in lifecycle.observe(AppEvent::DidFinishLaunching) {
        println!("launch: {}", transition.event_name());
    }
    println!("session: {}", lifecycle.session_id());

    // backgrounding registers the extension; a worker drains pending work
    for transition in lifecycle.observe(AppEvent::DidEnterBackground) {
        println!("background: {}", transition.event_name());
    }

    let done = holdover.guard().completion();
    let worker = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(100));
        done.finish();
    });

    let outcome = provider.hold(Duration::from_secs(2))?;
    println!("hold: {outcome:?}");
    worker.join().ok();

    for transition in lifecycle.observe(AppEvent::WillEnterForeground) {
        println!("foreground: {}", transition.event_name());
    }
    Ok(())
}
