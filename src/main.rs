//! Nauvoo CLI binary entry point: an interactive chat loop with tools.

use std::io::{BufRead, Write};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nauvoo::agent::Agent;
use nauvoo::config::{Backend, Config};
use nauvoo::provider::ChatProvider;
use nauvoo::types::GenerationSettings;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that has access to the weather of \
    locations. If the user wants to know the weather for a location, use any tool you have to \
    figure it out. Otherwise just answer appropriately.";

/// Nauvoo — chat with a tool-calling assistant
#[derive(Parser, Debug)]
#[command(name = "nauvoo", version, about = "Nauvoo — tool-calling chat CLI")]
struct Cli {
    /// Chat backend (ollama, openai); overrides CHAT_BACKEND
    #[arg(short, long)]
    backend: Option<String>,

    /// Model name; overrides OLLAMA_MODEL / OPENAI_MODEL
    #[arg(short, long)]
    model: Option<String>,

    /// Ollama endpoint; overrides OLLAMA_ENDPOINT
    #[arg(long)]
    endpoint: Option<String>,

    /// Sampling temperature; overrides MODEL_TEMPERATURE
    #[arg(short, long)]
    temperature: Option<f64>,

    /// System prompt override
    #[arg(short, long)]
    system: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> nauvoo::error::Result<()> {
    if let Some(backend) = &cli.backend {
        std::env::set_var("CHAT_BACKEND", backend);
    }
    let mut config = Config::from_env()?;

    match &mut config.backend {
        Backend::Ollama { base_url, model } => {
            if let Some(endpoint) = &cli.endpoint {
                *base_url = endpoint.clone();
            }
            if let Some(name) = &cli.model {
                *model = name.clone();
            }
        }
        Backend::OpenAi { model, .. } => {
            if let Some(name) = &cli.model {
                *model = name.clone();
            }
        }
    }
    if let Some(temperature) = cli.temperature {
        config.temperature = Some(temperature);
    }

    let provider: Arc<dyn ChatProvider> = Arc::from(nauvoo::provider::create_provider(&config)?);
    let registry = nauvoo::tools::builtin::default_registry(&config);

    let mut settings = GenerationSettings::default();
    settings.temperature = config.temperature;

    let mut agent = Agent::new(provider, registry)
        .with_system_prompt(cli.system.as_deref().unwrap_or(SYSTEM_PROMPT))
        .with_settings(settings);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Chat with AI (q to quit): ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let input = line?.trim().to_string();
        if input == "q" {
            break;
        }
        if input.is_empty() {
            continue;
        }

        match agent.send(input).await {
            Ok(reply) => println!("{reply}"),
            Err(e) if e.is_loop_failure() => eprintln!("Error: {e}"),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
