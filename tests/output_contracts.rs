use std::fs;
use std::path::Path;

use recast::tooling::cli::{CliContext, Commands};
use tempfile::TempDir;

fn write_doc(root: &Path, rel: &str, content: &str) {
    let path = root.join("agents").join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn source_doc(name: &str, tools: &str) -> String {
    format!(
        "---\nname: {name}\ndescription: The {name} agent\ntools: {tools}\n---\n## Persona\n\nBody of {name}.\n"
    )
}

fn context(temp: &TempDir) -> CliContext {
    CliContext::new(temp.path().to_path_buf(), None).unwrap()
}

#[test]
fn convert_emits_full_capability_map_with_edit_collapse() {
    let temp = TempDir::new().unwrap();
    write_doc(
        temp.path(),
        "grid-setup.md",
        &source_doc(
            "grid-setup",
            "Read, Write, Edit, MultiEdit, Bash, Glob, Grep",
        ),
    );

    let outcome = context(&temp)
        .execute(&Commands::Convert {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(outcome.success);

    let text = fs::read_to_string(temp.path().join("converted/grid-setup.md")).unwrap();
    assert!(text.contains("mode: subagent"));
    assert!(text.contains("temperature: 0.3"));
    for cap in ["read", "grep", "glob", "edit", "write", "bash"] {
        assert!(text.contains(&format!("{}: true", cap)), "missing {}", cap);
    }
    for cap in ["webfetch", "todowrite", "todoread", "list", "patch"] {
        assert!(text.contains(&format!("{}: false", cap)), "missing {}", cap);
    }
    assert!(text.ends_with("## Persona\n\nBody of grid-setup.\n"));
}

#[test]
fn convert_maps_webfetch_when_requested() {
    let temp = TempDir::new().unwrap();
    write_doc(
        temp.path(),
        "api-integration.md",
        &source_doc("api-integration", "Read, WebFetch"),
    );

    context(&temp)
        .execute(&Commands::Convert {
            format: "text".to_string(),
        })
        .unwrap();

    let text = fs::read_to_string(temp.path().join("converted/api-integration.md")).unwrap();
    assert!(text.contains("webfetch: true"));
    assert!(text.contains("write: false"));
}

#[test]
fn capability_keys_appear_in_fixed_order() {
    let temp = TempDir::new().unwrap();
    write_doc(
        temp.path(),
        "event-stream.md",
        &source_doc("event-stream", "Bash, Read"),
    );

    context(&temp)
        .execute(&Commands::Convert {
            format: "text".to_string(),
        })
        .unwrap();

    let text = fs::read_to_string(temp.path().join("converted/event-stream.md")).unwrap();
    let order = [
        "read:", "grep:", "glob:", "edit:", "write:", "bash:", "webfetch:", "todowrite:",
        "todoread:", "list:", "patch:",
    ];
    let positions: Vec<usize> = order.iter().map(|k| text.find(k).unwrap()).collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "capability keys out of order:\n{}", text);
}

#[test]
fn convert_is_byte_stable_across_runs() {
    let temp = TempDir::new().unwrap();
    write_doc(
        temp.path(),
        "workflow-runner.md",
        &source_doc("workflow-runner", "Read, Edit"),
    );

    let ctx = context(&temp);
    ctx.execute(&Commands::Convert {
        format: "text".to_string(),
    })
    .unwrap();
    let out_path = temp.path().join("converted/workflow-runner.md");
    let index_path = temp.path().join("converted/README.md");
    let first = fs::read_to_string(&out_path).unwrap();
    let first_index = fs::read_to_string(&index_path).unwrap();

    ctx.execute(&Commands::Convert {
        format: "text".to_string(),
    })
    .unwrap();
    assert_eq!(fs::read_to_string(&out_path).unwrap(), first);
    assert_eq!(fs::read_to_string(&index_path).unwrap(), first_index);
}

#[test]
fn unknown_tool_fails_one_document_not_the_batch() {
    let temp = TempDir::new().unwrap();
    write_doc(
        temp.path(),
        "good-setup.md",
        &source_doc("good-setup", "Read"),
    );
    write_doc(
        temp.path(),
        "bad-agent.md",
        &source_doc("bad-agent", "Read, Delete"),
    );

    let outcome = context(&temp)
        .execute(&Commands::Convert {
            format: "text".to_string(),
        })
        .unwrap();
    // Failure isolation: the batch succeeds, the failure is named.
    assert!(outcome.success);
    assert!(outcome.text.contains("bad-agent"));
    assert!(outcome.text.contains("Delete"));
    // The healthy document still converts.
    assert!(temp.path().join("converted/good-setup.md").exists());
    assert!(!temp.path().join("converted/bad-agent.md").exists());
}

#[test]
fn duplicate_id_in_nested_dir_keeps_first_occurrence() {
    let temp = TempDir::new().unwrap();
    write_doc(temp.path(), "twin.md", &source_doc("twin", "Read"));
    write_doc(
        temp.path(),
        "mirror/twin.md",
        &source_doc("twin", "Read, Write"),
    );

    let outcome = context(&temp)
        .execute(&Commands::Convert {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(outcome.text.contains("Duplicate ids"));

    // Shallowest path wins: the kept document has write disabled.
    let text = fs::read_to_string(temp.path().join("converted/twin.md")).unwrap();
    assert!(text.contains("write: false"));

    let index = fs::read_to_string(temp.path().join("converted/README.md")).unwrap();
    assert_eq!(index.matches("**twin**").count(), 1);
}

#[test]
fn narrative_and_target_documents_pass_through_byte_identical() {
    let temp = TempDir::new().unwrap();
    let narrative = "# Collection Notes\n\nProse only.\n";
    let target = "---\ndescription: Already converted\nmode: subagent\ntemperature: 0.3\ntools:\n  read: true\n  grep: false\n  glob: false\n  edit: false\n  write: false\n  bash: false\n  webfetch: false\n  todowrite: false\n  todoread: false\n  list: false\n  patch: false\n---\nDone.\n";
    write_doc(temp.path(), "notes.md", narrative);
    write_doc(temp.path(), "done-agent.md", target);

    let outcome = context(&temp)
        .execute(&Commands::Convert {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(outcome.success);
    assert!(outcome.text.contains("Passed through: 2"));
    assert_eq!(
        fs::read_to_string(temp.path().join("converted/notes.md")).unwrap(),
        narrative
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("converted/done-agent.md")).unwrap(),
        target
    );
}

#[test]
fn validate_json_contract_has_required_fields() {
    let temp = TempDir::new().unwrap();
    write_doc(
        temp.path(),
        "grid-setup.md",
        &source_doc("grid-setup", "Read"),
    );
    write_doc(
        temp.path(),
        "bad-agent.md",
        "---\nname: other-name\ndescription:\ntools: Delete\n---\nBody.\n",
    );

    let outcome = context(&temp)
        .execute(&Commands::Validate {
            format: "json".to_string(),
        })
        .unwrap();
    assert!(!outcome.success);

    let parsed: serde_json::Value = serde_json::from_str(&outcome.text).unwrap();
    assert_eq!(parsed["documents_checked"], 2);
    let diagnostics = parsed["diagnostics"].as_array().unwrap();
    assert!(!diagnostics.is_empty());
    for diag in diagnostics {
        assert!(diag.get("document").and_then(|v| v.as_str()).is_some());
        assert!(diag.get("check").and_then(|v| v.as_str()).is_some());
        assert!(diag.get("message").and_then(|v| v.as_str()).is_some());
        assert_eq!(diag["document"], "bad-agent");
    }
}

#[test]
fn validate_writes_nothing() {
    let temp = TempDir::new().unwrap();
    write_doc(
        temp.path(),
        "grid-setup.md",
        &source_doc("grid-setup", "Read"),
    );

    context(&temp)
        .execute(&Commands::Validate {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(!temp.path().join("converted").exists());
}

#[test]
fn converted_corpus_validates_clean() {
    let temp = TempDir::new().unwrap();
    write_doc(
        temp.path(),
        "grid-setup.md",
        &source_doc("grid-setup", "Read, Grep, Glob"),
    );

    context(&temp)
        .execute(&Commands::Convert {
            format: "text".to_string(),
        })
        .unwrap();

    // Re-point the source dir at the output and validate the emitted docs.
    fs::write(
        temp.path().join("recast.toml"),
        "source_dir = \"converted\"\noutput_dir = \"elsewhere\"\n",
    )
    .unwrap();
    let outcome = context(&temp)
        .execute(&Commands::Validate {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(outcome.success, "diagnostics: {}", outcome.text);
}

#[test]
fn index_rebuild_reflects_removals() {
    let temp = TempDir::new().unwrap();
    write_doc(
        temp.path(),
        "grid-setup.md",
        &source_doc("grid-setup", "Read"),
    );
    write_doc(
        temp.path(),
        "event-stream.md",
        &source_doc("event-stream", "Read"),
    );

    let ctx = context(&temp);
    ctx.execute(&Commands::Index {
        format: "text".to_string(),
    })
    .unwrap();
    let index_path = temp.path().join("converted/README.md");
    assert!(fs::read_to_string(&index_path).unwrap().contains("event-stream"));

    fs::remove_file(temp.path().join("agents/event-stream.md")).unwrap();
    ctx.execute(&Commands::Index {
        format: "text".to_string(),
    })
    .unwrap();
    let index = fs::read_to_string(&index_path).unwrap();
    assert!(!index.contains("event-stream"));
    assert!(index.contains("grid-setup"));
}

#[test]
fn index_categorizes_and_falls_back_to_uncategorized() {
    let temp = TempDir::new().unwrap();
    write_doc(
        temp.path(),
        "grid-setup.md",
        &source_doc("grid-setup", "Read"),
    );
    write_doc(
        temp.path(),
        "api-integration.md",
        &source_doc("api-integration", "Read"),
    );
    write_doc(
        temp.path(),
        "code-review.md",
        &source_doc("code-review", "Read"),
    );
    write_doc(
        temp.path(),
        "zeta-misc.md",
        &source_doc("zeta-misc", "Read"),
    );

    context(&temp)
        .execute(&Commands::Index {
            format: "text".to_string(),
        })
        .unwrap();
    let index = fs::read_to_string(temp.path().join("converted/README.md")).unwrap();
    assert!(index.contains("## Core Architecture"));
    assert!(index.contains("## Development Patterns"));
    assert!(index.contains("## Quality & Optimization"));
    assert!(index.contains("## Uncategorized"));
    assert!(index.contains("**zeta-misc**"));
}

#[test]
fn smoke_json_contract_lists_named_checks() {
    let temp = TempDir::new().unwrap();
    let outcome = context(&temp)
        .execute(&Commands::Smoke {
            format: "json".to_string(),
        })
        .unwrap();
    assert!(outcome.success);

    let parsed: serde_json::Value = serde_json::from_str(&outcome.text).unwrap();
    let checks = parsed["checks"].as_array().unwrap();
    assert!(checks.len() >= 5);
    for check in checks {
        assert_eq!(check[1], true, "failed check: {}", check[0]);
    }
}

#[test]
fn empty_source_dir_is_an_error_not_a_silent_noop() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("agents")).unwrap();
    let err = context(&temp)
        .execute(&Commands::Convert {
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(err.to_string().contains("failed") || err.to_string().contains("no documents"));
}
