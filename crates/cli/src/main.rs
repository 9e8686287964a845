use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use seoscope_core::{AnalysisResult, Analyzer, AnalyzerConfig, OpenAiOracle, OracleConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Analyze a CMS blog post for SEO quality
#[derive(Parser, Debug)]
#[command(name = "seoscope")]
#[command(version)]
#[command(about = "Score a blog post and its headline for SEO quality", long_about = None)]
struct Args {
    /// CMS document URL to analyze
    #[arg(value_name = "URL")]
    url: String,

    /// Print the raw JSON result instead of the report
    #[arg(long)]
    json: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Oracle model name (overrides SEOSCOPE_MODEL)
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// Skip the language-model oracle entirely
    #[arg(long)]
    no_oracle: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
    }

    let config = AnalyzerConfig::builder().timeout(args.timeout).build();
    let mut analyzer = Analyzer::with_config(config);

    if !args.no_oracle {
        match OracleConfig::from_env() {
            Some(mut oracle_config) => {
                if let Some(model) = &args.model {
                    oracle_config.model = model.clone();
                }
                let oracle = OpenAiOracle::new(oracle_config).context("failed to build oracle client")?;
                analyzer = analyzer.with_oracle(Arc::new(oracle));
            }
            None if args.verbose => {
                eprintln!("{}", "No OPENAI_API_KEY set; oracle fields will be empty".dimmed());
            }
            None => {}
        }
    }

    let result = analyzer
        .analyze_url(&args.url)
        .await
        .with_context(|| format!("failed to analyze {}", args.url))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(())
}

fn print_banner() {
    eprintln!("\n{} {} {}", "Seoscope".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Score blog posts and headlines for SEO quality".dimmed());
    eprintln!();
}

fn print_report(result: &AnalysisResult) {
    println!("{}", result.title.bold());
    if let Some(author) = &result.author {
        println!("{} {}", "By:".dimmed(), author);
    }
    if let Some(date) = &result.published_at {
        println!("{} {}", "Published:".dimmed(), date);
    }
    if !result.tags.is_empty() {
        let names: Vec<&str> = result.tags.iter().map(|t| t.name.as_str()).collect();
        println!("{} {}", "Tags:".dimmed(), names.join(", "));
    }
    println!();

    println!(
        "{}  {} words | {} headings | {} paragraphs | {} images | {}",
        "Structure".bold(),
        result.word_count,
        result.heading_count,
        result.paragraph_count,
        result.image_count,
        result.read_time,
    );
    println!();

    println!("{} {}", "Content score:".bold(), colored_score(result.score.total));
    let score = &result.score;
    print_factor("word_count", score.word_count, 20.0);
    print_factor("headings", score.headings, 15.0);
    print_factor("keyword_usage", score.keyword_usage, 15.0);
    print_factor("images", score.images, 10.0);
    print_factor("paragraphs", score.paragraphs, 10.0);
    print_factor("read_time", score.read_time, 10.0);
    print_factor("meta_description", score.meta_description, 10.0);
    print_factor("title_length", score.title_length, 10.0);
    println!();

    println!("{} {}", "Headline score:".bold(), colored_score(result.headline_score));
    println!();

    if !result.term_frequency.is_empty() {
        println!("{}", "Top terms".bold());
        for entry in &result.term_frequency {
            let density = result
                .keyword_density
                .get(&entry.term)
                .map(|d| format!(" ({d}%)"))
                .unwrap_or_default();
            println!("  {:>3}x {}{}", entry.count, entry.term, density.dimmed());
        }
        println!();
    }

    if let Some(narrative) = &result.narrative {
        for (label, body) in split_sections(narrative) {
            println!("{}", label.bold().bright_blue());
            println!("{body}");
            println!();
        }
    }
}

fn print_factor(name: &str, value: f64, max: f64) {
    println!("  {name:<18} {value:>5.1} / {max:>4.0}");
}

fn colored_score(total: u32) -> String {
    let text = format!("{total} / 100");
    if total >= 70 {
        text.green().to_string()
    } else if total >= 40 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

/// Splits the opaque narrative into labeled sections.
///
/// Paragraphs are delimited by blank lines. A paragraph whose first line
/// ends with a colon or opens with a Markdown heading marker starts a new
/// section under that label; leading unlabeled text falls under
/// "Analysis". Presentation logic only: the core returns the narrative
/// unsplit.
fn split_sections(narrative: &str) -> Vec<(String, String)> {
    let mut sections: Vec<(String, String)> = Vec::new();

    for paragraph in narrative.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        let mut lines = paragraph.lines();
        let first = lines.next().unwrap_or_default().trim();

        if let Some(label) = heading_label(first) {
            let rest: Vec<&str> = lines.collect();
            let mut body = rest.join("\n").trim().to_string();
            // "Label: inline text" keeps the inline text as the body.
            if let Some((_, inline)) = first.split_once(':') {
                let inline = inline.trim();
                if !inline.is_empty() {
                    body = if body.is_empty() {
                        inline.to_string()
                    } else {
                        format!("{inline}\n{body}")
                    };
                }
            }
            sections.push((label, body));
        } else if let Some(last) = sections.last_mut() {
            if !last.1.is_empty() {
                last.1.push_str("\n\n");
            }
            last.1.push_str(paragraph);
        } else {
            sections.push(("Analysis".to_string(), paragraph.to_string()));
        }
    }

    sections
}

/// Returns the label when a line reads like a section heading.
fn heading_label(line: &str) -> Option<String> {
    if let Some(stripped) = line.strip_prefix('#') {
        let label = stripped.trim_start_matches('#').trim();
        if !label.is_empty() {
            return Some(label.trim_end_matches(':').to_string());
        }
        return None;
    }

    let (head, _) = line.split_once(':')?;
    let head = head.trim();
    // Section labels are short phrases, not sentences with colons in them.
    if head.is_empty() || head.split_whitespace().count() > 4 {
        return None;
    }
    Some(head.to_string())
}
