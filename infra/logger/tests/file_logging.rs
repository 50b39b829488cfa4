use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use trek_logger::{LevelFilter, Logger, Rotation};

#[test]
fn json_file_layer_writes_log_lines() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let log_dir = dir.path().join("logs");

    let logger = Logger::builder()
        .name("trek-files")
        .console(false)
        .level(LevelFilter::INFO)
        .path(&log_dir)
        .rotation(Rotation::NEVER)
        .json()
        .init()?;
    assert!(logger.writes_files());

    tracing::info!(destination = "Kyoto", "catalog loaded");
    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("a log file is created");

    let contents = fs::read_to_string(log_file)?;
    assert!(contents.contains("catalog loaded"));
    assert!(contents.trim_start().starts_with('{'), "file output should be JSON");
    Ok(())
}
