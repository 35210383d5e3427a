use clockface::{Clock, ClockOptions, WindowConfig};
use std::env;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Thick arcs, everything else from the defaults
    let options = ClockOptions::builder()
        .style("modern")
        .hours_thickness(40.0)
        .minutes_thickness(40.0)
        .seconds_thickness(40.0)
        .build();

    let clock = Clock::new(Some(options)).with_window(
        WindowConfig::builder()
            .title("Modern clock")
            .width(480)
            .height(480)
            .build(),
    );

    // Optional run time in seconds, e.g. `cargo run --example modern -- 10`
    if let Some(seconds) = env::args().nth(1).and_then(|s| s.parse::<u64>().ok()) {
        let stop = clock.stop_handle();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(seconds));
            stop.stop();
        });
    }

    println!("Displaying a modern-style clock. Close the window to exit.");
    clock.show()?;
    Ok(())
}
