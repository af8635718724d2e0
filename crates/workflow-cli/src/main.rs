use std::env::VarError;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use workflow_core::app::{
    AddDependencyCommand, AddDependencyHandler, CommandHandler, EnsureTaskNodeCommand,
    EnsureTaskNodeHandler, GetWorkflowGraphQuery, QueryHandler, RemoveDependencyCommand,
    RemoveDependencyHandler, WorkflowQueryHandler,
};
use workflow_core::{
    DependencyRelation, EngineConfig, InMemoryGraphStore, ProjectId, TaskId, TaskNode,
    WorkflowEngine, WorkflowError,
};

const CONFIG_ENV: &str = "WORKFLOW_CONFIG";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Only an unset variable means "use defaults"; a non-UTF-8 path is an error.
fn load_config(var: Result<String, VarError>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    match var {
        Ok(path) => {
            info!(%path, "loading engine config");
            Ok(EngineConfig::load(path)?)
        }
        Err(VarError::NotPresent) => Ok(EngineConfig::default()),
        Err(err) => Err(format!("{CONFIG_ENV}: {err}").into()),
    }
}

/// Registers one node per name and returns the fresh ids in the same order.
async fn register_tasks<const N: usize>(
    ensure: &EnsureTaskNodeHandler,
    project: &ProjectId,
    names: [&str; N],
) -> Result<[TaskId; N], WorkflowError> {
    let ids = names.map(|_| TaskId::generate());
    for (name, id) in names.into_iter().zip(&ids) {
        let node = TaskNode::new(id.clone(), project.clone()).with_name(name);
        ensure.handle(EnsureTaskNodeCommand { node }).await?;
    }
    Ok(ids)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // (A) Store と Engine を用意
    let config = load_config(std::env::var(CONFIG_ENV))?;
    let engine = Arc::new(WorkflowEngine::with_config(InMemoryGraphStore::new(), &config));

    let ensure = EnsureTaskNodeHandler::new(engine.clone());
    let add = AddDependencyHandler::new(engine.clone());
    let remove = RemoveDependencyHandler::new(engine.clone());
    let queries = WorkflowQueryHandler::new(engine.clone());

    // (B) タスクノードを登録（A, B, C）
    let project = ProjectId::generate();
    let [a, b, c] = register_tasks(&ensure, &project, ["design", "build", "ship"]).await?;

    // (C) A -> B -> C を張り、C -> A は循環として拒否される
    for (from, to) in [(&a, &b), (&b, &c), (&c, &a)] {
        let dependency = DependencyRelation::new(from.clone(), to.clone());
        match add.handle(AddDependencyCommand { dependency }).await {
            Ok(()) => info!(%from, %to, "accepted"),
            Err(err @ WorkflowError::Cycle { .. }) => info!(%err, "rejected"),
            Err(err) => {
                error!(%err, "unexpected failure");
                return Err(err.into());
            }
        }
    }

    let graph = queries.handle(GetWorkflowGraphQuery { project: project.clone() }).await?;
    println!("{}", serde_json::to_string_pretty(&graph)?);

    // (D) B -> C を外すと C の blocked が解除される
    remove
        .handle(RemoveDependencyCommand {
            from: b.clone(),
            to: c.clone(),
        })
        .await?;

    let graph = queries.handle(GetWorkflowGraphQuery { project }).await?;
    println!("{}", serde_json::to_string_pretty(&graph)?);
    Ok(())
}
