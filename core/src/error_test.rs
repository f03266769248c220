#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io;

    use crate::error::{HarnessError, Phase};

    #[test]
    fn test_io_cause_reported_once() {
        let err = HarnessError::Execution {
            program: "./engine".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such engine binary"),
        };
        assert_eq!(err.phase(), Phase::Execution);
        assert_eq!(err.to_string(), "execution phase failed: cannot run engine './engine'");
        assert_eq!(err.source().unwrap().to_string(), "no such engine binary");

        let chain = format!("{:?}", anyhow::Error::new(err));
        assert_eq!(chain.matches("no such engine binary").count(), 1, "{}", chain);
    }

    #[test]
    fn test_config_error_has_no_source() {
        let err = HarnessError::config("word_count must be at least 1");
        assert_eq!(err.to_string(), "config phase failed: word_count must be at least 1");
        assert!(err.source().is_none());
    }
}
