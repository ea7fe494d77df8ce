//! Put-logging walk-through.
//!
//! This demo plays the part of the external runtime:
//! 1. Initialize put logging with `hook_pv_logging`
//! 2. Drive the before/after phases of a few trapped writes
//! 3. Show the degraded missing-before case
//!
//! Run with: `cargo run --example put_logging`

use std::path::Path;

use pvlog::{
    hook_pv_logging, Error, FieldHandle, OwnedField, PendingSlot, PutLogger, WriteMessage,
    WritePhase, WriteRuntime,
};

/// A stand-in for the control-system runtime: applies the policy file and
/// holds the registered listener.
#[derive(Default)]
struct DemoRuntime {
    listener: Option<PutLogger>,
}

impl WriteRuntime for DemoRuntime {
    fn apply_access_policy(&mut self, path: &Path) -> Result<(), Error> {
        println!("(runtime) applying access policy {}", path.display());
        Ok(())
    }

    fn register_listener(&mut self, logger: PutLogger) {
        self.listener = Some(logger);
    }
}

impl DemoRuntime {
    /// Drives both phases of one trapped write, as the runtime would.
    fn put(&self, user: &str, host: &str, old: &dyn FieldHandle, new: &dyn FieldHandle) {
        let logger = self.listener.as_ref().expect("listener registered");
        let mut slot = PendingSlot::new();

        logger
            .on_write(
                &mut WriteMessage {
                    user,
                    host,
                    handle: Some(old),
                    slot: &mut slot,
                },
                WritePhase::Before,
            )
            .expect("before phase");

        // ... the actual write happens here, outside the logger ...

        logger
            .on_write(
                &mut WriteMessage {
                    user,
                    host,
                    handle: Some(new),
                    slot: &mut slot,
                },
                WritePhase::After,
            )
            .expect("after phase");
    }
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    println!("=== Put Logging Example ===\n");

    // The policy file just has to resolve; its contents belong to the runtime.
    let policy = std::env::temp_dir().join("pvlog-demo-access.acf");
    std::fs::write(&policy, "ASG(DEFAULT) { RULE(1, WRITE, TRAPWRITE) }\n")
        .expect("write demo policy");

    let mut runtime = DemoRuntime::default();
    hook_pv_logging(&mut runtime, &policy, 4).expect("initialize put logging");

    println!("\n--- Scalar writes ---");
    runtime.put(
        "alice",
        "host1",
        &OwnedField::floats("MOTOR1", "VAL", vec![3.14]),
        &OwnedField::floats("MOTOR1", "VAL", vec![6.28]),
    );
    runtime.put(
        "bob",
        "host2",
        &OwnedField::texts("PUMP", "STAT", vec!["Off"]),
        &OwnedField::texts("PUMP", "STAT", vec!["On"]),
    );

    println!("\n--- Array write (bounded at 4 elements) ---");
    runtime.put(
        "alice",
        "host1",
        &OwnedField::doubles("WAVE", "VAL", vec![0.0; 8]),
        &OwnedField::doubles("WAVE", "VAL", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]),
    );

    println!("\n--- After with no matching before ---");
    let logger = runtime.listener.as_ref().expect("listener registered");
    let mut slot = PendingSlot::new();
    let new = OwnedField::floats("MOTOR2", "VAL", vec![1.5]);
    logger
        .on_write(
            &mut WriteMessage {
                user: "carol",
                host: "host3",
                handle: Some(&new),
                slot: &mut slot,
            },
            WritePhase::After,
        )
        .expect("degraded emission");
}
