//! CLI command definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mcqa")]
#[command(version, about = "Answer multiple-choice questions with an LLM, optionally grounded in a reference corpus")]
#[command(long_about = r#"
mcqa asks an OpenAI-compatible chat model to pick one option of a
multiple-choice question and prints the 0-based index of the chosen option
(-1 when the reply matches no option).

Configuration comes from the environment (a .env file is loaded if present):
  OPENAI_API_KEY (required), OPENAI_BASE_URL, OPENAI_CHAT_MODEL,
  OPENAI_EMBEDDING_MODEL, MCQA_USE_RAG, RETRIEVE_CONTEXT_FOR_ANSWERS,
  REFERENCE_CORPUS_PATH, RAG_CHUNK_SIZE, RAG_CHUNK_OVERLAP, RAG_TOP_K,
  EMBEDDING_BATCH, ANSWER_LOG_PATH

Example:
  mcqa ask -q "What does Sanger sequencing use?" -c "labeled ddNTPs" -c "labeled dNTPs"
  mcqa eval --dataset biology.jsonl --no-rag
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Answer without retrieved context, overriding MCQA_USE_RAG
    #[arg(long, global = true)]
    pub no_rag: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer a single question
    Ask {
        /// Question text
        #[arg(short, long)]
        question: String,

        /// Answer choice, in order (repeat for each option)
        #[arg(short, long = "choice", value_name = "TEXT", required = true)]
        choices: Vec<String>,
    },

    /// Answer every question of a JSONL dataset and report accuracy
    Eval {
        /// One `{"question", "choices", "answer"}` object per line
        #[arg(short, long, value_name = "PATH")]
        dataset: PathBuf,

        /// Suppress the progress bar
        #[arg(long)]
        quiet: bool,
    },
}
