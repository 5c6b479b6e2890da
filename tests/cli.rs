use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.events.lock().unwrap().push(format!("{event:?}"));
    }
}

#[tokio::test]
#[serial]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use gitbook_sync::cli::{run, Cli, Commands, ProgressFormat};

    let cli = Cli {
        command: Commands::Sync {
            config: Some(std::path::PathBuf::from("dummy.yaml")),
            dir: None,
            org: None,
            space: None,
            group: None,
            api_endpoint: None,
            progress: ProgressFormat::Plain,
        },
    };

    let result = run(cli).await;
    assert!(result.is_err(), "a missing config file must fail the run");

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}

#[test]
#[serial]
fn sync_fails_without_token() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("gitbook-sync").expect("Binary exists");
    cmd.current_dir(dir.path())
        .env_remove("GITBOOK_TOKEN")
        .env_remove("INPUT_TOKEN")
        .args(["sync", "--dir", ".", "--org", "Org", "--space", "Space"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("GITBOOK_TOKEN"));
}

#[test]
#[serial]
fn sync_reports_missing_options() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("gitbook-sync").expect("Binary exists");
    cmd.current_dir(dir.path())
        .env("GITBOOK_TOKEN", "token")
        .env_remove("INPUT_DIR")
        .env_remove("INPUT_SPACE")
        .args(["sync", "--org", "Org"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing required option(s): dir, space"));
}

#[test]
#[serial]
fn dotenv_in_parent_directory_is_ignored() {
    let parent = tempfile::tempdir().unwrap();
    std::fs::write(parent.path().join(".env"), "GITBOOK_TOKEN=from-parent\n").unwrap();
    let child = parent.path().join("child");
    std::fs::create_dir(&child).unwrap();

    let mut cmd = Command::cargo_bin("gitbook-sync").expect("Binary exists");
    cmd.current_dir(&child)
        .env_remove("GITBOOK_TOKEN")
        .env_remove("INPUT_TOKEN")
        .args(["sync", "--dir", ".", "--org", "Org", "--space", "Space"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("GITBOOK_TOKEN"));
}

#[test]
#[serial]
fn dotenv_in_working_directory_supplies_token() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "GITBOOK_TOKEN=from-dotenv\n").unwrap();

    let mut cmd = Command::cargo_bin("gitbook-sync").expect("Binary exists");
    cmd.current_dir(dir.path())
        .env_remove("GITBOOK_TOKEN")
        .env_remove("INPUT_TOKEN")
        .env_remove("INPUT_SPACE")
        .args(["sync", "--dir", ".", "--org", "Org"]);

    // Getting past the token check proves the file was read.
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing required option(s): space"));
}

#[test]
#[serial]
fn actions_progress_reports_failure_as_workflow_error() {
    let dir = tempfile::tempdir().unwrap();
    // Bind then drop to get a port with nothing listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut cmd = Command::cargo_bin("gitbook-sync").expect("Binary exists");
    cmd.current_dir(dir.path())
        .env("GITBOOK_TOKEN", "token")
        .args(["sync", "--dir", ".", "--org", "Org", "--space", "Space"])
        .args(["--api-endpoint", &format!("http://{addr}/v1/")])
        .args(["--progress", "actions"]);

    cmd.assert().failure().stdout(
        predicate::str::contains("::group::Requesting organizations")
            .and(predicate::str::contains("::error::No organization found")),
    );
}

#[test]
fn help_lists_sync_flags() {
    let mut cmd = Command::cargo_bin("gitbook-sync").expect("Binary exists");
    cmd.args(["sync", "--help"]);
    cmd.assert().success().stdout(
        predicate::str::contains("--org")
            .and(predicate::str::contains("--space"))
            .and(predicate::str::contains("--group"))
            .and(predicate::str::contains("--api-endpoint")),
    );
}
