use std::fs;
use std::path::Path;
use std::sync::Arc;

use agentforge::agent::{MemoryStorage, ModelCatalog, RunState, StoredAgentProvider};
use agentforge::config::ConfigLoader;
use agentforge::{Agent, SinkRegistry};
use serde_json::json;
use tempfile::TempDir;

use crate::integration::support::{echo_model, model, object};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let logs = temp.path().join("logs");
    write(
        temp.path(),
        "agentforge.toml",
        &format!(
            "[logging]\nfolder = {:?}\n\n[[logging.channels]]\nname = \"AgentForge\"\nlevel = \"error\"\n\n[[logging.channels]]\nname = \"ModelIO\"\nlevel = \"debug\"\n\n[agents]\nfolder = \"defs\"\npersonas_folder = \"people\"\n",
            logs.display().to_string()
        ),
    );
    write(
        temp.path(),
        "defs/Greeter.yaml",
        "prompts:\n  system: \"You are {name}.\"\n  user: \"Greet {guest}\"\n  followup: \"Mention {topic}\"\nparams:\n  temperature: 0.7\npersona: host\nmodel: echo\n",
    );
    write(temp.path(), "people/host.yaml", "Name: Max\nMood: cheerful\n");
    temp
}

fn catalog() -> ModelCatalog {
    let mut models = ModelCatalog::new();
    models.register("echo", echo_model());
    models.register("shout", model(|prompts, _| Ok(prompts.join(" ").to_uppercase())));
    models
}

#[test]
fn stored_definition_runs_end_to_end() {
    let temp = project();
    let config = ConfigLoader::load(temp.path()).unwrap();
    let storage = Arc::new(MemoryStorage::new());
    let provider = Arc::new(
        StoredAgentProvider::from_paths(temp.path(), &config.agents, catalog())
            .with_storage(storage.clone()),
    );
    assert_eq!(provider.list_agents().unwrap(), vec!["Greeter"]);

    let agent = Agent::with_logging(
        "Greeter",
        provider,
        &config.logging,
        Arc::new(SinkRegistry::new()),
    )
    .unwrap();
    let output = agent.run(object(json!({"guest": "Ada"})));

    assert_eq!(output, Some(json!("You are Max.\nGreet Ada")));
    assert_eq!(storage.records("Results"), vec![json!("You are Max.\nGreet Ada")]);

    let model_io = fs::read_to_string(config.logging.folder.join("ModelIO.log")).unwrap();
    assert!(model_io.contains("[Greeter] Prompt:\nGreet Ada"));
    assert!(!config.logging.folder.join("Results.log").exists());
}

#[test]
fn edited_definition_is_picked_up_on_the_next_run() {
    let temp = project();
    let config = ConfigLoader::load(temp.path()).unwrap();
    let provider = Arc::new(StoredAgentProvider::from_paths(
        temp.path(),
        &config.agents,
        catalog(),
    ));
    let agent = Agent::with_logging(
        "Greeter",
        provider.clone(),
        &config.logging,
        Arc::new(SinkRegistry::new()),
    )
    .unwrap();
    assert!(agent.run(object(json!({"guest": "Ada"}))).is_some());

    let path = provider.agent_path("Greeter");
    fs::write(&path, "prompts:\n  user: \"hi {guest}\"\nmodel: shout\n").unwrap();
    // Force a distinct mtime so the definition cache sees the edit.
    let file = fs::File::options().write(true).open(&path).unwrap();
    file.set_modified(std::time::SystemTime::now() + std::time::Duration::from_secs(5))
        .unwrap();

    assert_eq!(agent.run(object(json!({"guest": "Ada"}))), Some(json!("HI ADA")));
}

#[test]
fn broken_definition_aborts_and_is_logged() {
    let temp = project();
    write(temp.path(), "defs/Broken.yaml", "prompts:\n  user: hi\nmodel: missing-model\n");
    let config = ConfigLoader::load(temp.path()).unwrap();
    let provider = Arc::new(StoredAgentProvider::from_paths(
        temp.path(),
        &config.agents,
        catalog(),
    ));

    let agent = Agent::with_logging(
        "Broken",
        provider,
        &config.logging,
        Arc::new(SinkRegistry::new()),
    )
    .unwrap();
    let report = agent.execute(Default::default());

    assert!(matches!(report.state(), RunState::Aborted(_)));
    assert_eq!(report.output, None);
    let log = fs::read_to_string(config.logging.folder.join("AgentForge.log")).unwrap();
    assert!(log.contains("missing-model"), "log: {}", log);
}
