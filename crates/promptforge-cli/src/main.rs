use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use promptforge_core::analyzer::{self, AnalysisResult, FeedbackKind};
use promptforge_core::assembler::PromptAssembler;
use promptforge_core::brief::BriefInput;
use promptforge_core::history::{FileBackend, HistoryStore};
use promptforge_core::platform::PlatformRegistry;
use promptforge_core::template;
use promptforge_core::variation::{self, RandomSource, SeededRandom, ThreadRandom};
use serde_json::{json, Map, Value};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "promptforge",
    version,
    about = "Prompt engineering toolkit for image generation platforms"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Assemble(AssembleArgs),
    Analyze(AnalyzeArgs),
    Vary(VaryArgs),
    Templates(TemplatesArgs),
    Platforms(PlatformsArgs),
    History(HistoryArgs),
}

#[derive(Debug, Parser)]
struct AssembleArgs {
    #[arg(long)]
    brief: Option<PathBuf>,
    #[arg(long)]
    template: Option<u32>,
    #[arg(long)]
    platform: Option<String>,
    #[arg(long)]
    no_weighting: bool,
    #[arg(long)]
    analyze: bool,
    #[arg(long)]
    save: bool,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct AnalyzeArgs {
    #[arg(long)]
    prompt: Option<String>,
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser)]
struct VaryArgs {
    #[arg(long)]
    prompt: String,
    #[arg(long, default_value_t = 3)]
    count: usize,
    #[arg(long, default_value = "universal")]
    platform: String,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser)]
struct TemplatesArgs {
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser)]
struct PlatformsArgs {
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser)]
struct HistoryArgs {
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: HistoryCommand,
}

#[derive(Debug, Subcommand)]
enum HistoryCommand {
    List(ListArgs),
    Stats(StatsArgs),
    Favorite(FavoriteArgs),
    Unfavorite(UnfavoriteArgs),
    Clear,
}

#[derive(Debug, Parser)]
struct ListArgs {
    #[arg(long)]
    favorites: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser)]
struct StatsArgs {
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser)]
struct FavoriteArgs {
    id: String,
}

#[derive(Debug, Parser)]
struct UnfavoriteArgs {
    id: String,
}

const DATA_DIR_ENV: &str = "PROMPTFORGE_DATA_DIR";
const DEFAULT_DATA_DIR: &str = ".promptforge";
const STORE_FILE: &str = "collections.json";

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("promptforge error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Assemble(args) => run_assemble(args),
        Command::Analyze(args) => run_analyze(args),
        Command::Vary(args) => run_vary(args),
        Command::Templates(args) => run_templates(args),
        Command::Platforms(args) => run_platforms(args),
        Command::History(args) => run_history(args),
    }
}

fn run_assemble(args: AssembleArgs) -> Result<i32> {
    let (brief, template_platform) = load_brief(&args)?;
    let platform = args
        .platform
        .clone()
        .or(template_platform)
        .unwrap_or_else(|| "universal".to_string());

    let assembler = PromptAssembler::new(None);
    let prompt = assembler.assemble(&brief, &platform, !args.no_weighting);
    let analysis = args.analyze.then(|| analyzer::analyze(&prompt));

    if args.save {
        let mut store = open_store(args.data_dir.clone());
        store.save(&prompt, &platform, brief_parameters(&brief))?;
    }

    if args.json {
        let mut payload = json!({ "prompt": prompt, "platform": platform });
        if let Some(analysis) = &analysis {
            payload["analysis"] = serde_json::to_value(analysis)?;
        }
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{prompt}");
        if let Some(analysis) = &analysis {
            print_analysis(analysis);
        }
    }
    Ok(0)
}

fn run_analyze(args: AnalyzeArgs) -> Result<i32> {
    let text = match (&args.prompt, &args.file) {
        (Some(_), Some(_)) => bail!("pass either --prompt or --file, not both"),
        (Some(prompt), None) => prompt.clone(),
        (None, Some(path)) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading prompt {}", path.display()))?;
            raw.trim_end().to_string()
        }
        (None, None) => bail!("analyze requires --prompt or --file"),
    };
    let analysis = analyzer::analyze(&text);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(0)
}

fn run_vary(args: VaryArgs) -> Result<i32> {
    let mut random: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };
    let variants = variation::generate(&args.prompt, args.count, &args.platform, random.as_mut());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&variants)?);
    } else {
        for variant in &variants {
            println!("{}", variant.prompt);
        }
    }
    Ok(0)
}

fn run_templates(args: TemplatesArgs) -> Result<i32> {
    let all = template::templates();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&all)?);
    } else {
        for template in &all {
            println!("{}. {} [{}]", template.id, template.name, template.platform);
            println!("   {}", template.description);
        }
    }
    Ok(0)
}

fn run_platforms(args: PlatformsArgs) -> Result<i32> {
    let registry = PlatformRegistry::new(None);
    if args.json {
        let payload: Vec<Value> = registry
            .list()
            .map(|profile| {
                json!({
                    "id": profile.id,
                    "name": profile.display_name,
                    "supports_negative_prompt": profile.supports_negative_prompt,
                    "supports_parameters": profile.supports_parameters,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        for profile in registry.list() {
            let negative = if profile.supports_negative_prompt {
                "yes"
            } else {
                "no"
            };
            let parameters = if profile.supports_parameters { "yes" } else { "no" };
            println!(
                "{} - {} (negative prompt: {negative}, parameters: {parameters})",
                profile.id, profile.display_name
            );
        }
    }
    Ok(0)
}

fn run_history(args: HistoryArgs) -> Result<i32> {
    let mut store = open_store(args.data_dir);
    match args.command {
        HistoryCommand::List(list) => {
            let entries = if list.favorites {
                store.favorites()
            } else {
                store.history()
            };
            if list.json {
                println!("{}", serde_json::to_string_pretty(entries)?);
            } else if entries.is_empty() {
                println!("No entries.");
            } else {
                for entry in entries {
                    let marker = if entry.is_favorite { "*" } else { " " };
                    println!(
                        "{marker} {} [{}] used {}x at {}",
                        entry.id, entry.platform, entry.usage_count, entry.timestamp
                    );
                    println!("   {}", entry.prompt);
                }
            }
        }
        HistoryCommand::Stats(stats_args) => {
            let stats = store.stats();
            if stats_args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Prompts: {}", stats.total_prompts);
                println!("Favorites: {}", stats.favorite_count);
                println!("Most used platform: {}", stats.most_used_platform);
                println!("Average prompt length: {}", stats.average_prompt_length);
            }
        }
        HistoryCommand::Favorite(favorite) => {
            let entry = store
                .find(&favorite.id)
                .cloned()
                .ok_or_else(|| anyhow!("no history entry with id {}", favorite.id))?;
            if store.add_to_favorites(entry)? {
                println!("Favorited {}", favorite.id);
            } else {
                println!("Already a favorite: {}", favorite.id);
            }
        }
        HistoryCommand::Unfavorite(unfavorite) => {
            store.remove_from_favorites(&unfavorite.id)?;
            println!("Unfavorited {}", unfavorite.id);
        }
        HistoryCommand::Clear => {
            store.clear()?;
            println!("History cleared.");
        }
    }
    Ok(0)
}

fn load_brief(args: &AssembleArgs) -> Result<(BriefInput, Option<String>)> {
    match (&args.brief, args.template) {
        (Some(_), Some(_)) => bail!("pass either --brief or --template, not both"),
        (Some(path), None) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading brief {}", path.display()))?;
            let brief = serde_json::from_str(&raw)
                .with_context(|| format!("parsing brief {}", path.display()))?;
            Ok((brief, None))
        }
        (None, Some(id)) => {
            let template = template::find(id).ok_or_else(|| anyhow!("no template with id {id}"))?;
            Ok((template.brief, Some(template.platform)))
        }
        (None, None) => bail!("assemble requires --brief or --template"),
    }
}

fn brief_parameters(brief: &BriefInput) -> Map<String, Value> {
    let mut parameters = Map::new();
    parameters.insert("aspect_ratio".to_string(), json!(brief.aspect_ratio));
    parameters.insert("cfg_scale".to_string(), json!(brief.cfg_scale));
    parameters.insert("quality".to_string(), json!(brief.quality));
    if !brief.model_version.is_empty() {
        parameters.insert("model_version".to_string(), json!(brief.model_version));
    }
    parameters
}

fn print_analysis(analysis: &AnalysisResult) {
    println!();
    println!(
        "Score: {}/{} ({})",
        analysis.score,
        analysis.max_score,
        analysis.band().label()
    );
    for item in &analysis.feedback {
        let marker = match item.kind {
            FeedbackKind::Positive => "+",
            FeedbackKind::Warning => "!",
        };
        println!("  {marker} {}", item.message);
    }
    for suggestion in &analysis.suggestions {
        println!("  > {suggestion}");
    }
}

fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn open_store(flag: Option<PathBuf>) -> HistoryStore {
    let path = resolve_data_dir(flag).join(STORE_FILE);
    tracing::debug!(path = %path.display(), "opening prompt store");
    HistoryStore::new(Box::new(FileBackend::new(path)))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promptforge=info,promptforge_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
