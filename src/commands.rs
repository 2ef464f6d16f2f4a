use crate::ai::request::ChatRequest;
use crate::config::Config;
use crate::core::codec;
use crate::core::descriptor::PromptDescriptor;
use crate::core::schema;
use crate::core::store::{PromptSnapshot, PromptStore, SnapshotEntry};
use crate::error::PromptError;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "prompt-kit", version, about = "Compose, store and render assistant prompts")]
pub struct Cli {
    /// Snapshot file (overrides PROMPT_KIT_STATE)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store a new prompt and print its id
    Add {
        #[arg(long)]
        prompt: String,
        #[arg(long, conflicts_with = "context_file")]
        context: Option<String>,
        /// Read the context from a file, e.g. the current selection
        #[arg(long)]
        context_file: Option<PathBuf>,
        #[arg(long)]
        kind: Option<String>,
    },
    /// List stored prompts
    List {
        #[arg(long)]
        kind: Option<String>,
    },
    /// Print one prompt as its JSON envelope
    Show {
        id: Uuid,
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
    /// Store a prompt from a JSON envelope file and print its id
    Import { file: PathBuf },
    /// Replace fields of a stored prompt
    Edit {
        id: Uuid,
        #[arg(long)]
        prompt: Option<String>,
        #[arg(long)]
        context: Option<String>,
        #[arg(long)]
        kind: Option<String>,
    },
    /// Delete a stored prompt
    Remove { id: Uuid },
    /// Print the chat-completion request a prompt renders to
    Render {
        id: Uuid,
        #[arg(long)]
        model: Option<String>,
    },
    /// Print the JSON Schema of the prompt envelope
    Schema,
}

pub async fn run(command: Command, config: &Config) -> Result<(), PromptError> {
    let store = PromptStore::new(&config.state_path);
    log::debug!("Using prompt state '{}'", store.path().display());

    match command {
        Command::Add {
            prompt,
            context,
            context_file,
            kind,
        } => {
            let id = add(&store, prompt, context, context_file, kind).await?;
            println!("{id}");
        }
        Command::List { kind } => {
            let snapshot = store.load().await?;
            for line in list_lines(&snapshot, kind.as_deref()) {
                println!("{line}");
            }
        }
        Command::Show { id, compact } => {
            let snapshot = store.load().await?;
            let descriptor = lookup(&snapshot, id)?;
            let text = if compact {
                codec::encode(descriptor)?
            } else {
                codec::encode_pretty(descriptor)?
            };
            println!("{text}");
        }
        Command::Import { file } => {
            let id = import(&store, &file).await?;
            println!("{id}");
        }
        Command::Edit {
            id,
            prompt,
            context,
            kind,
        } => {
            edit(&store, id, prompt, context, kind).await?;
        }
        Command::Remove { id } => {
            let mut snapshot = store.load().await?;
            snapshot
                .remove(id)
                .ok_or_else(|| PromptError::NotFound(format!("prompt {id}")))?;
            store.save(&snapshot).await?;
            log::info!("🗑️  Removed prompt {id}");
        }
        Command::Render { id, model } => {
            let snapshot = store.load().await?;
            let model = model.as_deref().unwrap_or(&config.model);
            let request = ChatRequest::from_source(lookup(&snapshot, id)?, model)?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&schema::envelope_schema()?)?);
        }
    }

    Ok(())
}

async fn add(
    store: &PromptStore,
    prompt: String,
    context: Option<String>,
    context_file: Option<PathBuf>,
    kind: Option<String>,
) -> Result<Uuid, PromptError> {
    let context = match context_file {
        Some(path) => Some(tokio::fs::read_to_string(&path).await?),
        None => context,
    };

    let mut descriptor = PromptDescriptor::default();
    descriptor.set_context_text(context);
    descriptor.set_prompt_text(Some(prompt));
    descriptor.set_prompt_kind(kind);

    let mut snapshot = store.load().await?;
    let id = snapshot.insert(descriptor);
    store.save(&snapshot).await?;
    log::info!("📝 Stored prompt {id}");
    Ok(id)
}

async fn import(store: &PromptStore, file: &Path) -> Result<Uuid, PromptError> {
    let raw = tokio::fs::read_to_string(file).await?;
    let descriptor = codec::decode(&raw)?;

    let mut snapshot = store.load().await?;
    let id = snapshot.insert(descriptor);
    store.save(&snapshot).await?;
    log::info!("📥 Imported prompt {id} from '{}'", file.display());
    Ok(id)
}

async fn edit(
    store: &PromptStore,
    id: Uuid,
    prompt: Option<String>,
    context: Option<String>,
    kind: Option<String>,
) -> Result<(), PromptError> {
    let mut snapshot = store.load().await?;
    let mut updated = lookup(&snapshot, id)?.clone();

    if prompt.is_some() {
        updated = updated.with_prompt_text(prompt);
    }
    if context.is_some() {
        updated = updated.with_context_text(context);
    }
    if kind.is_some() {
        updated = updated.with_prompt_kind(kind);
    }

    snapshot.replace(id, updated);
    store.save(&snapshot).await?;
    log::info!("✏️  Updated prompt {id}");
    Ok(())
}

fn lookup(snapshot: &PromptSnapshot, id: Uuid) -> Result<&PromptDescriptor, PromptError> {
    snapshot
        .get(id)
        .ok_or_else(|| PromptError::NotFound(format!("prompt {id}")))
}

fn list_lines(snapshot: &PromptSnapshot, kind: Option<&str>) -> Vec<String> {
    if snapshot.is_empty() {
        return vec!["No prompts stored".to_string()];
    }
    let entries: Vec<&SnapshotEntry> = match kind {
        Some(kind) => snapshot.by_kind(kind),
        None => snapshot.entries.iter().collect(),
    };
    if entries.is_empty() {
        return vec![format!("No prompts of kind '{}'", kind.unwrap_or_default())];
    }
    entries.into_iter().map(summary_line).collect()
}

fn summary_line(entry: &SnapshotEntry) -> String {
    let kind = entry.descriptor.prompt_kind().unwrap_or("-");
    let prompt = entry.descriptor.prompt_text().unwrap_or("").replace('\n', " ");
    let prompt = if prompt.chars().count() > 60 {
        format!("{}...", prompt.chars().take(60).collect::<String>())
    } else {
        prompt
    };
    let context = if entry.descriptor.context_text().is_some() { " +ctx" } else { "" };
    format!("{}  [{}]{}  {}", entry.id, kind, context, prompt)
}
