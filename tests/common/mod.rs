#![allow(dead_code)]

use std::collections::VecDeque;
use std::process::{Command, Output};

use parking_lot::Mutex;
use tempfile::TempDir;

use alertdesk::error::{AlertDeskError, Result};
use alertdesk::query::AlertQuery;
use alertdesk::remote::AlertGateway;
use alertdesk::types::{Alert, AlertType, TimeWindow, Version};

pub fn alertdesk_binary() -> &'static str {
    env!("CARGO_BIN_EXE_alertdesk")
}

/// Runs the binary with an empty config directory and no URL override
pub struct AlertDeskTest {
    pub temp_dir: TempDir,
}

impl AlertDeskTest {
    pub fn new() -> Self {
        AlertDeskTest {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn command(&self) -> Command {
        let mut command = Command::new(alertdesk_binary());
        command
            .current_dir(self.temp_dir.path())
            .env("HOME", self.temp_dir.path())
            .env("XDG_CONFIG_HOME", self.temp_dir.path())
            .env_remove("ALERTDESK_URL")
            .env_remove("RUST_LOG");
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("Failed to execute alertdesk command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Command {:?} should have failed\nstdout: {}",
            args,
            String::from_utf8_lossy(&output.stdout)
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}

pub fn alert(id: u64, datetime: &str, value: f64, version: Version, sended: bool) -> Alert {
    Alert {
        id: Some(id),
        datetime: datetime.to_string(),
        value,
        version,
        alert_type: AlertType::classify(version, value),
        sended,
    }
}

/// `count` version-1 alerts with distinct ids starting at 1
pub fn alerts(count: u64) -> Vec<Alert> {
    (1..=count)
        .map(|id| {
            alert(
                id,
                &format!("2024-05-{:02} 12:00:00", id % 28 + 1),
                250.0 + (id % 7) as f64 * 100.0,
                Version::V1,
                id % 3 == 0,
            )
        })
        .collect()
}

pub fn server_error(endpoint: &'static str) -> AlertDeskError {
    AlertDeskError::Api {
        endpoint,
        status: 500,
        message: "Error: database unavailable".to_string(),
    }
}

/// A recorded gateway call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search(AlertQuery),
    Process(Option<Version>, TimeWindow),
    Send(Option<Version>, Option<AlertType>),
}

/// Scripted gateway. Unscripted searches return no alerts, unscripted
/// actions succeed.
#[derive(Default)]
pub struct FakeGateway {
    searches: Mutex<VecDeque<Result<Vec<Alert>>>>,
    actions: Mutex<VecDeque<Result<()>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_searches(results: impl IntoIterator<Item = Result<Vec<Alert>>>) -> Self {
        let gateway = Self::new();
        gateway.searches.lock().extend(results);
        gateway
    }

    pub fn push_search(&self, result: Result<Vec<Alert>>) {
        self.searches.lock().push_back(result);
    }

    pub fn push_action(&self, result: Result<()>) {
        self.actions.lock().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn search_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, Call::Search(_)))
            .count()
    }

    fn next_action(&self) -> Result<()> {
        self.actions.lock().pop_front().unwrap_or(Ok(()))
    }
}

impl AlertGateway for FakeGateway {
    async fn search(&self, query: &AlertQuery) -> Result<Vec<Alert>> {
        self.calls.lock().push(Call::Search(*query));
        self.searches.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn process(&self, version: Option<Version>, window: TimeWindow) -> Result<()> {
        self.calls.lock().push(Call::Process(version, window));
        self.next_action()
    }

    async fn send(&self, version: Option<Version>, alert_type: Option<AlertType>) -> Result<()> {
        self.calls.lock().push(Call::Send(version, alert_type));
        self.next_action()
    }
}
