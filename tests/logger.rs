use std::fs;
use taigalist::logger::Logger;

#[test]
fn test_config_based_logging_disabled() {
    // Test with logging disabled
    let logger = Logger::from_config(false).unwrap();
    assert!(!logger.is_enabled());
    assert!(!logger.has_file_writer());

    logger.log("Test message".to_string());
    let logs = logger.get_logs();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].contains("Test message"));
}

#[test]
fn test_file_logging() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("taigalist.log");

    let logger = Logger::with_file(&path).unwrap();
    assert!(logger.is_enabled());
    assert!(logger.has_file_writer());

    logger.log("Test message with file".to_string());

    // Readable right away, without an explicit flush or drop
    let file_content = fs::read_to_string(&path).unwrap();
    assert!(file_content.contains("Test message with file"));

    logger.log("Second line".to_string());
    logger.flush().unwrap();
    let file_content = fs::read_to_string(&path).unwrap();
    assert_eq!(file_content.lines().count(), 2);
}

#[test]
fn test_file_lines_survive_a_clone_held_elsewhere() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taigalist.log");

    let logger = Logger::with_file(&path).unwrap();
    // A long-lived clone, like the one the installed dispatcher keeps
    let _sink = logger.clone();
    logger.log("Kept while the sink is alive".to_string());
    drop(logger);

    let file_content = fs::read_to_string(&path).unwrap();
    assert!(file_content.contains("Kept while the sink is alive"));
}

#[test]
fn test_logs_are_newest_first_and_bounded() {
    let logger = Logger::new();
    for i in 0..600 {
        logger.log(format!("line {}", i));
    }

    let logs = logger.get_logs();
    assert_eq!(logs.len(), 500);
    assert!(logs[0].ends_with("line 599"));
    assert!(logs[499].ends_with("line 100"));

    logger.clear();
    assert!(logger.get_logs().is_empty());
}
