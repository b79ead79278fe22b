use std::process::Command;

fn binary() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ecr-image-sizes"));
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn test_missing_arguments_exit_with_one() {
    let output = binary().output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(" - ERROR - Error reading AWS credentials: "));
}

#[test]
fn test_missing_secret_key_exits_before_authenticating() {
    let output = binary().arg("AKIAEXAMPLE").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("Authenticating to AWS ECR"));
}

#[test]
fn test_help_exits_cleanly() {
    let output = binary().arg("--help").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AWS_ACCESS_KEY"));
    assert!(stdout.contains("AWS_SECRET_KEY"));
}
