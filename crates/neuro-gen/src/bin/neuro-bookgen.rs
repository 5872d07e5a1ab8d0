use std::process::ExitCode;
use std::time::Duration;

use neuro_gen::{
    build_chat_provider, builtin_books, run_batch, BatchOptions, ChatCompletionConfig,
    ChatProviderConfig, Generator, GENERATION_MODEL,
};
use neuro_gen::output::write_book_fixtures;
use tracing::{error, info};

const OUTPUT_DIR: &str = "data/generated_books";
const LIST_FILE: &str = "data/top_5_books.json";
const BATCH_SIZE: usize = 1;
const BATCH_DELAY: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let Ok(api_key) = std::env::var("OPENAI_API_KEY") else {
        error!("OPENAI_API_KEY is not set");
        return ExitCode::FAILURE;
    };

    let config = ChatCompletionConfig::new(api_key, GENERATION_MODEL);
    let provider = match build_chat_provider(ChatProviderConfig::OpenAiCompatible(config)) {
        Ok(provider) => provider,
        Err(error) => {
            error!(%error, "failed to build chat provider");
            return ExitCode::FAILURE;
        }
    };

    let generator = Generator::new(provider);
    let specs = builtin_books();
    let requested = specs.len();
    info!(requested, "starting book generation");

    let options = BatchOptions {
        batch_size: BATCH_SIZE,
        delay: BATCH_DELAY,
    };
    let books = run_batch(specs, &options, |spec| generator.generate_book(spec)).await;

    if books.is_empty() {
        error!("no book summaries were successfully generated");
        return ExitCode::FAILURE;
    }

    if let Err(error) = write_book_fixtures(OUTPUT_DIR, LIST_FILE, &books) {
        error!(%error, "failed to write fixtures");
        return ExitCode::FAILURE;
    }

    info!(generated = books.len(), requested, "book generation finished");
    ExitCode::SUCCESS
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter,
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
}
