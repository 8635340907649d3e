/*
[INPUT]:  FlowController, task id, optional summary override
[OUTPUT]: Imported Task or CreateResponse printed as JSON on stdout
[POS]:    Headless CLI commands - the clone flow without a terminal UI
[UPDATE]: When import/clone output or draft overrides change
*/

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use task_cloner::{FlowController, TaskEditor};

pub async fn run_import(flow: &FlowController, task_id: &str) -> Result<()> {
    let task = flow
        .import_task(task_id)
        .await
        .with_context(|| format!("import task {}", task_id.trim()))?;
    print_json(task.as_ref())
}

pub async fn run_clone(
    flow: &FlowController,
    task_id: &str,
    summary: Option<&str>,
    copy_attachments: bool,
) -> Result<()> {
    let task = flow
        .import_task(task_id)
        .await
        .with_context(|| format!("import task {}", task_id.trim()))?;

    let mut editor = TaskEditor::new();
    editor.sync_with(Some(&task), copy_attachments);
    if let (Some(summary), Some(draft)) = (summary, editor.draft_mut()) {
        draft.summary.set_value(summary);
    }

    let payload = editor
        .submit(flow.notices())
        .context("build clone payload")?;
    info!(summary = %payload.summary, attachments = payload.attachments.len(), "submitting clone");

    let response = flow
        .on_create_clone(payload)
        .await
        .context("create cloned task")?;
    print_json(&response)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("encode output as JSON")?;
    println!("{json}");
    Ok(())
}
