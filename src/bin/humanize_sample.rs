use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use textguard::services::humanizer::within_length_bounds;
use textguard::{
    init_logging, Engine, EngineConfig, HumanizationMode, HumanizationOptions, PatternDatabase,
    TextAnalysis,
};

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn print_analysis(label: &str, a: &TextAnalysis) {
    println!(
        "{}: human={:.1} perplexity={:.1} bursty={:.1} diversity={:.1} penalty={:.1} patterns={} low_confidence={}",
        label,
        a.human_score,
        a.perplexity_score,
        a.bursty_score,
        a.lexical_diversity,
        a.pattern_penalty,
        a.ai_patterns.len(),
        a.low_confidence
    );
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    file: String,
    mode: HumanizationMode,
    seed: Option<u64>,
    discipline: Option<String>,
    input_chars: usize,
    output_chars: usize,
    length_ok: bool,
    before: TextAnalysis,
    after: TextAnalysis,
    humanized: String,
}

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  cargo run --bin humanize_sample -- <path.txt> [--mode quick|academic|aggressive] [--seed <n>] [--discipline <name>] [--config <cfg.json>] [--out <json_path>]\n\nNotes:\n  - Without --seed the output differs between runs.\n  - Logs go to stderr; TEXTGUARD_LOG=debug shows every stage."
        );
        return Ok(());
    }

    let path = args[1].clone();
    let mode = match parse_arg_value(&args, "--mode") {
        Some(raw) => match HumanizationMode::from_str(&raw) {
            Some(mode) => mode,
            None => bail!("unknown mode '{}'", raw),
        },
        None => HumanizationMode::Academic,
    };
    let seed: Option<u64> = parse_arg_value(&args, "--seed")
        .map(|s| s.parse().with_context(|| format!("invalid seed '{}'", s)))
        .transpose()?;
    let discipline = parse_arg_value(&args, "--discipline");
    let config = match parse_arg_value(&args, "--config") {
        Some(cfg_path) => {
            let raw = std::fs::read_to_string(&cfg_path)
                .with_context(|| format!("read config failed: {}", cfg_path))?;
            EngineConfig::from_json_str(&raw)?
        }
        None => EngineConfig::default(),
    };
    let out_path = parse_arg_value(&args, "--out");

    let bytes = std::fs::read(&path).with_context(|| format!("read file failed: {}", path))?;
    let engine = Engine::new(PatternDatabase::builtin(), config)?;
    let before = engine.analyze_bytes(&bytes)?;
    let text = String::from_utf8(bytes).context("input is not UTF-8")?;

    let mut options = HumanizationOptions::for_mode(mode);
    options.discipline_hint = discipline.clone();
    let humanized = match seed {
        Some(seed) => engine.humanize_with_rng(&text, &options, &mut StdRng::seed_from_u64(seed)),
        None => engine.humanize(&text, &options),
    };
    let after = engine.analyze(&humanized);

    println!("File: {}", path);
    println!("Locale: {}", before.locale.as_str());
    println!("Mode: {:?}", mode);
    println!();
    print_analysis("Before", &before);
    print_analysis("After ", &after);
    println!();
    for p in before.ai_patterns.iter() {
        println!("[P] bytes=[{},{}] {:>5.1} {}  {}", p.start, p.end, p.weight, p.category.as_str(), p.text);
    }
    for s in after.suggestions.iter() {
        println!("[S] {:?}: {}", s.kind, s.message);
    }
    println!();
    println!("Humanized: {}", preview(&humanized, 400));

    let input_chars = text.chars().count();
    let out = Output {
        file: path.clone(),
        mode,
        seed,
        discipline,
        input_chars,
        output_chars: humanized.chars().count(),
        length_ok: within_length_bounds(input_chars, &humanized),
        before,
        after,
        humanized,
    };
    let json = serde_json::to_string_pretty(&out)?;
    match out_path {
        Some(out_path) => {
            std::fs::write(&out_path, json).with_context(|| format!("write out failed: {}", out_path))?;
            println!();
            println!("Wrote JSON: {}", out_path);
        }
        None => {
            println!();
            println!("{}", json);
        }
    }

    Ok(())
}
