//! Example: Feeding the dashboard from an in-process simulator
//!
//! Starts a simulator that emits into a watch channel and polls the channel
//! the same way the dashboard does, printing the alerts of every snapshot.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example channel_source
//! ```

use std::time::Duration;

use vitalwatch_sim::{Output, Simulator};
use vitalwatch_tui::{ChannelSource, DataSource, Thresholds, VitalsData};

#[tokio::main]
async fn main() {
    println!("Channel source example");
    println!("Simulating three children...\n");

    let (output, rx) = Output::watch();
    let simulator = Simulator::builder()
        .output(output)
        .interval(Duration::from_secs(1))
        .build();

    for (name, age) in [("Fatima", 8.0), ("Paul", 18.0), ("Ibrahim", 36.0)] {
        simulator.register(name, age).expect("valid age");
    }

    // A manual reading next to the synthetic ones
    let ruth = simulator.register("Ruth", 4.0).expect("valid age");
    ruth.record_heart_rate(135.0).expect("valid heart rate");

    let emission = simulator.start();
    let mut source = ChannelSource::new(rx, "simulator");
    let thresholds = Thresholds::default();

    println!("Receiving snapshots (press Ctrl+C to stop):\n");

    for _ in 0..20 {
        if let Some(snapshot) = source.poll() {
            let data = VitalsData::from_snapshot(snapshot, &thresholds);
            let counts = data.status_counts();
            println!(
                "{} children: {} normal, {} warning, {} critical",
                data.children.len(),
                counts.normal,
                counts.warning,
                counts.critical
            );
            for (child, alert) in data.alerts().iter().take(5) {
                println!(
                    "  {:<5} {:<8} {:<12} {} ({})",
                    alert.status().symbol(),
                    child.name,
                    alert.label(),
                    alert.value(),
                    alert.when()
                );
            }
            println!();
        }

        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    emission.stop();
}
