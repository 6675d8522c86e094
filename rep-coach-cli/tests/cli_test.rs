use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Isolated config and database for one test
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        // No key file anywhere the dietician might look
        fs::write(
            dir.path().join("config.toml"),
            format!(
                "[dietician]\napi_key_path = {:?}\n",
                dir.path().join("no_api_key").to_string_lossy()
            ),
        )
        .unwrap();
        Self { dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("rep-coach").unwrap();
        cmd.env("REP_COACH_CONFIG", self.dir.path().join("config.toml"))
            .env("REP_COACH_DB_PATH", self.dir.path().join("db"))
            .env_remove("REP_COACH_API_KEY")
            .env_remove("RUST_LOG")
            .write_stdin("");
        cmd
    }

    fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }
}

/// One JSON line with a left hip/knee/ankle chain bent to `degrees`
fn leg_line(timestamp_ms: u64, degrees: f64) -> String {
    let heading = (-90.0f64 + degrees).to_radians();
    serde_json::json!({
        "timestamp_ms": timestamp_ms,
        "landmarks": {
            "left_hip": {"x": 0.5, "y": 0.3, "visibility": 0.99},
            "left_knee": {"x": 0.5, "y": 0.5, "visibility": 0.99},
            "left_ankle": {"x": 0.5 + 0.2 * heading.cos(), "y": 0.5 + 0.2 * heading.sin(), "visibility": 0.99},
        }
    })
    .to_string()
}

fn write_squats(path: &Path, reps: usize) {
    let mut lines = Vec::new();
    for _ in 0..reps {
        for deg in [175.0, 130.0, 80.0, 130.0] {
            lines.push(leg_line(lines.len() as u64 * 33, deg));
        }
    }
    fs::write(path, lines.join("\n")).unwrap();
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("rep-coach").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Pose-based rep counter"))
        .stdout(predicate::str::contains("train"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("rep-coach").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("rep-coach").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_rep-coach"));
}

#[test]
fn test_unknown_exercise_fails() {
    let sandbox = Sandbox::new();
    let frames = sandbox.path("frames.jsonl");
    write_squats(&frames, 1);

    sandbox
        .cmd()
        .args(["train", "yoga", "--frames"])
        .arg(&frames)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown exercise 'yoga'"));
}

#[test]
fn test_missing_recording_fails() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["train", "squat", "--frames"])
        .arg(sandbox.path("missing.jsonl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Capture device unavailable"));
}

#[test]
fn test_replayed_session_is_saved_and_listed() {
    let sandbox = Sandbox::new();
    let frames = sandbox.path("squats.jsonl");
    write_squats(&frames, 3);

    sandbox
        .cmd()
        .args(["train", "squat", "--silent", "--frames"])
        .arg(&frames)
        .assert()
        .success()
        .stdout(predicate::str::contains("Session saved: 3 reps, 1.5 calories."));

    sandbox
        .cmd()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Squat"))
        .stdout(predicate::str::contains("1 workouts, 1.50 calories"));

    sandbox
        .cmd()
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.50 / 2000 kcal"))
        .stdout(predicate::str::contains("Total Reps: 3"))
        .stdout(predicate::str::contains("Workouts Completed: 1"))
        .stdout(predicate::str::contains("Favorite Move: Squat"))
        .stdout(predicate::str::contains("Squat: 3 reps"));
}

#[test]
fn test_session_without_reps_saves_nothing() {
    let sandbox = Sandbox::new();
    let frames = sandbox.path("still.jsonl");
    let lines: Vec<_> = (0..10).map(|i| leg_line(i * 33, 130.0)).collect();
    fs::write(&frames, lines.join("\n")).unwrap();

    sandbox
        .cmd()
        .args(["train", "squat", "--silent", "--frames"])
        .arg(&frames)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to save"));

    sandbox
        .cmd()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout history found yet."));
}

#[test]
fn test_profile_set_and_show() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["profile", "set", "--name", "Jo", "--age", "28", "--goal", "1800"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile saved!"));

    sandbox
        .cmd()
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jo"))
        .stdout(predicate::str::contains("1800 kcal"));

    sandbox
        .cmd()
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.00 / 1800 kcal"))
        .stdout(predicate::str::contains("Favorite Move: None"));
}

#[test]
fn test_invalid_profile_is_rejected() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["profile", "set", "--name", "Jo", "--age", "200", "--goal", "1800"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Age must be between 5 and 120"));
}

#[test]
fn test_ask_without_api_key() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["ask", "what", "should", "I", "eat?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API key is missing"));
}

#[test]
fn test_config_init_and_show() {
    let sandbox = Sandbox::new();
    let config = sandbox.path("fresh.toml");

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hold_timing = \"elapsed\""));
}
