#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;
    use std::path::Path;
    use std::time::Duration;

    use crate::engine::{Engine, EngineOutcome, ProcessEngine};

    #[test]
    fn test_closures_are_engines() {
        let stub = |input: &Path, output: &Path| -> io::Result<EngineOutcome> {
            fs::copy(input, output)?;
            Ok(EngineOutcome::Exited { code: Some(0) })
        };
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "abc\n").unwrap();

        let outcome = stub.run(&input, &output).unwrap();
        assert!(outcome.is_success());
        assert_eq!(fs::read_to_string(&output).unwrap(), "abc\n");
    }

    #[test]
    fn test_missing_binary_fails_to_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        fs::write(&input, "").unwrap();
        let engine = ProcessEngine::new(dir.path().join("no-such-engine"));
        let err = engine.run(&input, &dir.path().join("out.txt")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = ProcessEngine::new("cat");
        assert!(engine
            .run(&dir.path().join("absent.txt"), &dir.path().join("out.txt"))
            .is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_redirects_stdin_and_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "+ a 1\n- a\na\n").unwrap();
        fs::write(&output, "stale contents that must disappear\n").unwrap();

        let outcome = ProcessEngine::new("cat").run(&input, &output).unwrap();
        assert_eq!(outcome, EngineOutcome::success());
        assert_eq!(fs::read_to_string(&output).unwrap(), "+ a 1\n- a\na\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("script.sh");
        fs::write(&input, "exit 3\n").unwrap();
        let outcome = ProcessEngine::new("sh")
            .run(&input, &dir.path().join("out.txt"))
            .unwrap();
        assert_eq!(outcome, EngineOutcome::Exited { code: Some(3) });
        assert!(!outcome.is_success());
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_engine() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("script.sh");
        fs::write(&input, "sleep 5\n").unwrap();
        let engine = ProcessEngine::new("sh").with_timeout(Some(Duration::from_millis(100)));
        let outcome = engine.run(&input, &dir.path().join("out.txt")).unwrap();
        match outcome {
            EngineOutcome::TimedOut { after } => {
                assert!(after >= Duration::from_millis(100));
                assert!(after < Duration::from_secs(5));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_not_hit_by_fast_engine() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        fs::write(&input, "x\n").unwrap();
        let engine = ProcessEngine::new("cat").with_timeout(Some(Duration::from_secs(30)));
        let outcome = engine.run(&input, &dir.path().join("out.txt")).unwrap();
        assert!(outcome.is_success());
    }

    #[test]
    fn test_describe_names_the_program() {
        assert_eq!(ProcessEngine::new("./build/main").describe(), std::path::PathBuf::from("./build/main"));
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_exec_wrapped_engine_promptly() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("script.sh");
        fs::write(&input, "exec sleep 5\n").unwrap();
        let engine = ProcessEngine::new("sh").with_timeout(Some(Duration::from_millis(100)));

        let started = std::time::Instant::now();
        let outcome = engine.run(&input, &dir.path().join("out.txt")).unwrap();
        assert!(outcome.is_timeout());
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
