#![allow(dead_code)]

use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use irt_dashboard::models::Channel;
use tempfile::{Builder, NamedTempFile};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Channels of the synthetic logger export written by [`logger_export`].
pub fn fixture_channels() -> Vec<Channel> {
    vec![
        Channel::new("IRT_A", "Sensor A"),
        Channel::new("IRT_B", "Sensor B"),
        Channel::new("IRT_C", "Sensor C"),
        Channel::new("IRT_D", "Sensor D"),
    ]
}

/// Six 5-minute buckets, two readings each.
///
/// Bucket means: `IRT_A` climbs 20..=25, `IRT_B` stays at 20, `IRT_C` wobbles,
/// `IRT_D` only ever logs the sentinel.
pub fn logger_export_csv() -> String {
    const C: [f64; 6] = [19.0, 21.5, 20.0, 22.5, 21.0, 24.0];

    let mut csv = String::from("TIMESTAMP,RECORD,IRT_A,IRT_B,IRT_C,IRT_D\n");
    for i in 0..6u32 {
        let a = 20.0 + f64::from(i);
        let minute = 5 * i;
        csv.push_str(&format!(
            "7/1/2024 10:{:02},{},{},20,{},-9999\n",
            minute,
            2 * i + 1,
            a - 0.5,
            C[i as usize]
        ));
        csv.push_str(&format!(
            "7/1/2024 10:{:02},{},{},20,-9999,-9999\n",
            minute + 2,
            2 * i + 2,
            a + 0.5
        ));
    }
    csv
}

/// Path of a committed fixture under the repository `data/` directory.
pub fn repo_data_path(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../data")
        .join(file_name)
}

/// Write `contents` to a temp file with the given suffix.
pub fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// The synthetic logger export on disk as CSV.
pub fn logger_export() -> NamedTempFile {
    temp_file(".csv", &logger_export_csv())
}

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to process-global env
/// vars across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
