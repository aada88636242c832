use contrib_readme::logger;

#[test]
fn test_log_file_path() {
    let path = logger::log_file_path().unwrap();
    assert!(path.ends_with("contrib-readme/contrib-readme.log"));
}

#[test]
fn test_disabled_logging_has_no_file() {
    // Only one global logger can be installed per process
    let result = logger::init(false).unwrap();
    assert!(result.is_none());

    log::warn!("stderr only");
    assert!(logger::init(false).is_err());
}
