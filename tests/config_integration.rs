use std::path::PathBuf;

use vj::config::{ConfigFlags, ThemeMode, load_config_flags, parse_flag_tokens, save_config_flags};

#[test]
fn test_rc_file_with_comments() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".vjrc");
    std::fs::write(
        &path,
        "# project defaults\n--watch   # reload on save\n\n--theme light\n--debug-log=vj.log\n",
    )
    .unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.watch);
    assert!(!flags.perf);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.debug_log, Some(PathBuf::from("vj.log")));
}

#[test]
fn test_saved_flags_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config");
    let flags = ConfigFlags {
        margin: Some(7),
        theme: Some(ThemeMode::Dark),
        ..ConfigFlags::default()
    };
    save_config_flags(&path, &flags).unwrap();
    assert_eq!(load_config_flags(&path).unwrap(), flags);
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".vjrc");
    let content = "--watch\n--theme light --margin 2\n--debug-log file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "vj".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
        "--perf".to_string(),
        "data.json".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.watch, "file flags should remain enabled");
    assert!(effective.perf, "cli flags should be applied");
    assert_eq!(effective.theme, Some(ThemeMode::Dark), "cli should override theme");
    assert_eq!(effective.margin, Some(2));
    assert_eq!(
        effective.debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "vj".to_string(),
        "--theme=no-color".to_string(),
        "--margin=0".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.theme, Some(ThemeMode::NoColor));
    assert_eq!(flags.margin, Some(0));
}

#[test]
fn test_missing_config_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}
