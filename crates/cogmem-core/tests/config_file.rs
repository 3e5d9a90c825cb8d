//! Loading assistant configuration from TOML files on disk.

use std::io::Write;

use cogmem_core::{Assistant, AssistantConfig, ConfigError, ReasoningStrategy};

fn write_config(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
[memory]
capacity = 25
context_limit = 3
user_importance = 2.5

[reasoning]
strategy = "tree_of_thought"
step_delay_ms = 0
"#,
    );

    let config = AssistantConfig::load(file.path()).unwrap();
    assert_eq!(config.memory.capacity, 25);
    assert_eq!(config.memory.context_limit, 3);
    assert_eq!(config.memory.user_importance, 2.5);
    assert_eq!(config.reasoning.strategy, ReasoningStrategy::TreeOfThought);
    assert!(config.reasoning.step_delay().is_zero());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AssistantConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_non_finite_importance_rejected() {
    let file = write_config("[memory]\nuser_importance = nan\n");
    let err = AssistantConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[tokio::test]
async fn test_loaded_config_drives_assistant() {
    let file = write_config("[memory]\ncapacity = 2\n[reasoning]\nstrategy = \"basic\"\n");
    let config = AssistantConfig::load(file.path()).unwrap();
    let mut assistant = Assistant::from_config(&config).unwrap();

    assistant.process("one").await.unwrap();
    assistant.process("two").await.unwrap();

    let stats = assistant.session_stats();
    assert_eq!(stats.total_memories, 2);
    assert_eq!(stats.evicted_total, 2);
    assert_eq!(stats.reasoning_strategy, ReasoningStrategy::Basic);
}
