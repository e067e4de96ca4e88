mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use mcq_agent::{
    AgentConfig, IndicatifProgress, McqAgent, NoopProgress, Progress, evaluate, load_dataset,
};
use tracing::info;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use ai_llm_service::telemetry::{console_layer, env_filter};
use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine; variables may come from the shell.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(console_layer().with_filter(env_filter("info")))
        .init();

    let mut cfg = AgentConfig::from_env().context("loading configuration")?;
    if cli.no_rag {
        cfg.use_rag = false;
    }
    info!(use_rag = cfg.use_rag, corpus = ?cfg.rag.corpus_path, "starting mcqa");

    let agent = McqAgent::from_config(cfg)
        .await
        .context("initializing the answering agent")?;

    match cli.command {
        Command::Ask { question, choices } => {
            let idx = agent.get_response(&question, &choices).await?;
            println!("{idx}");
        }
        Command::Eval { dataset, quiet } => {
            let cases = load_dataset(&dataset)?;
            let progress: Box<dyn Progress> = if quiet {
                Box::new(NoopProgress)
            } else {
                Box::new(IndicatifProgress::bar(cases.len() as u64))
            };
            let summary = evaluate(&agent, &cases, progress.as_ref()).await;
            println!("{summary}");
        }
    }

    Ok(())
}
