// Continuous scan example for any supported PC/SC reader

// Prints every event the session publishes until the scan times out after
// a period without new tags. Run with:
//
// cargo run -p nfctag --example scan --features pcsc

use nfctag::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let device = DeviceSessionBuilder::new().with_pcsc()?.build()?;
    let (events, rx) = EventChannel::new();
    let mut engine = Engine::new(TagSession::new(
        device,
        SessionConfig::default(),
        Callbacks::from_channel(events),
    ));

    engine.start_scan()?;
    // the channel closes once the engine, and with it the session, is gone
    let printer = std::thread::spawn(move || {
        for event in rx {
            match event {
                Event::Status(s) => println!("[status] {}", s),
                Event::Info(s) => println!("{}\n", s),
                Event::State(s) => println!("[state] {}", s),
                Event::Debug { .. } | Event::Progress { .. } => {}
            }
        }
    });

    match engine.join() {
        Some(Completion::Scan(Ok(outcome))) => println!("scan finished: {}", outcome),
        Some(Completion::Scan(Err(e))) => println!("scan failed: {}", e),
        _ => {}
    }
    drop(engine);
    let _ = printer.join();
    Ok(())
}
