// Batch write example: writes one address to a number of tags

// Usage:
//
// cargo run -p nfctag --example batch_write --features pcsc -- example.com/menu 3

use nfctag::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let address = args.next().unwrap_or_else(|| "https://example.com".to_string());
    let quantity: u32 = args.next().and_then(|q| q.parse().ok()).unwrap_or(1);

    let device = DeviceSessionBuilder::new().with_pcsc()?.build()?;
    let callbacks = Callbacks::new()
        .on_status(|s: &str| println!("{}", s))
        .on_progress(|current: u32, total: u32| println!("progress {}/{}", current, total));
    let mut session = TagSession::new(device, SessionConfig::default(), callbacks);

    let report = session.batch_write(&address, quantity, false)?;
    println!(
        "{} of {} tags written ({})",
        report.written, report.quantity, report.outcome
    );
    Ok(())
}
