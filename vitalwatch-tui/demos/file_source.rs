//! Example: Following a snapshot file
//!
//! Polls a JSON snapshot file, such as one written by the simulator's
//! `Output::file`, and prints each child's evaluated status when it changes.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example file_source -- path/to/vitals.json
//! ```

use std::env;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use vitalwatch_tui::{DataSource, FileSource, Thresholds, VitalsData};

fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example file_source -- <path-to-vitals.json>");
        eprintln!();
        eprintln!("The file should contain a JSON snapshot in the format:");
        eprintln!(
            r#"  {{"version": {{"major": 1, "minor": 0}}, "timestamp_ms": 0, "children": {{"Ruth": {{"age_months": 4}}}}}}"#
        );
        std::process::exit(1);
    });

    println!("Following file: {}", path);
    println!("Press Ctrl+C to stop\n");

    let mut source = FileSource::new(&path);
    let thresholds = Thresholds::default();

    loop {
        match source.poll() {
            Some(snapshot) => {
                let data = VitalsData::from_snapshot(snapshot, &thresholds);
                println!("Snapshot received with {} children:", data.children.len());
                for child in &data.children {
                    let hr = child
                        .heart_rate()
                        .map(|bpm| format!("{} bpm", bpm))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "  - {:<10} {:<12} {:>8}  normal {}  [{}]",
                        child.name,
                        child.band.label(),
                        hr,
                        child.band.normal_range_label(),
                        child.status.label()
                    );
                }
                println!();
            }
            None => {
                if let Some(err) = source.error() {
                    eprint!("\rError: {}  ", err);
                } else {
                    print!("\rWaiting for changes...  ");
                }
                let _ = io::stdout().flush();
            }
        }

        thread::sleep(Duration::from_millis(500));
    }
}
