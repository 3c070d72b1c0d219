//! Promptreel CLI - Video prompts from the terminal
//!
//! Talks to a Promptreel server when one answers, calls OpenAI directly when
//! a key is configured, and otherwise falls back to local templates.

mod api;
mod config;
mod probe;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Password;
use tracing_subscriber::EnvFilter;

use promptreel::{
    EnvironmentRouter, FragmentOverrides, GenerativeAssistant, OpenAiProvider, PromptRequest,
    Routed,
};

use api::RemoteRoute;
use config::Config;
use probe::HttpEnvironmentProbe;

#[derive(Parser)]
#[command(name = "promptreel")]
#[command(
    about = "Promptreel CLI - Assemble and enrich video-generation prompts",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Show which route answered
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a prompt from an idea and style fragments
    Generate {
        /// Short idea (at most 100 characters)
        idea: String,
        /// Target model: veo3, flow, runway, pika
        #[arg(short, long, default_value = "veo3")]
        model: String,
        #[arg(long)]
        visual_style: Option<String>,
        #[arg(long)]
        camera_movement: Option<String>,
        #[arg(long)]
        background: Option<String>,
        #[arg(long)]
        lighting_mood: Option<String>,
        #[arg(long)]
        audio_cues: Option<String>,
        #[arg(long)]
        color_palette: Option<String>,
        #[arg(long)]
        negative_prompts: Option<String>,
        /// Also print the unfilled template
        #[arg(long)]
        show_template: bool,
    },

    /// List starter presets, or render one
    Templates {
        /// Preset id to render (e.g. cinematic-veo3)
        #[arg(short, long = "use", value_name = "ID")]
        use_id: Option<String>,
    },

    /// Complete a partial idea
    Suggest { input: String },

    /// Score a prompt and list feedback
    Analyze { prompt: String },

    /// Rewrite a prompt for a model
    Refine {
        prompt: String,
        #[arg(short, long, default_value = "veo3")]
        model: String,
    },

    /// Optimize an idea into a high-quality prompt
    Optimize {
        idea: String,
        #[arg(short, long, default_value = "veo3")]
        model: String,
        /// Existing prompt to improve on
        #[arg(short, long)]
        current: Option<String>,
    },

    /// Magic mode: expand one word into a story and prompt
    Magic {
        word: String,
        #[arg(short, long, default_value = "veo3")]
        model: String,
    },

    /// Alternative versions of a story
    Variations {
        story: String,
        #[arg(short, long, default_value = "veo3")]
        model: String,
    },

    /// Derive cinematic elements from a story
    Elements {
        story: String,
        #[arg(short, long, default_value = "veo3")]
        model: String,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the Promptreel server URL (empty string disables it)
    SetUrl { url: String },
    /// Store an OpenAI API key (will prompt if not provided)
    SetKey {
        #[arg(short, long)]
        key: Option<String>,
    },
    /// Per-route timeout in seconds
    SetTimeout { secs: u64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let verbose = cli.verbose;

    match cli.command {
        Commands::Config { action } => cmd_config(action.unwrap_or(ConfigAction::Show)).await,
        Commands::Generate {
            idea,
            model,
            visual_style,
            camera_movement,
            background,
            lighting_mood,
            audio_cues,
            color_palette,
            negative_prompts,
            show_template,
        } => {
            let fragments = FragmentOverrides {
                visual_style,
                camera_movement,
                background,
                lighting_mood,
                audio_cues,
                color_palette,
                negative_prompts,
            };
            cmd_generate(idea, model, fragments, show_template, verbose).await
        }
        Commands::Templates { use_id } => cmd_templates(use_id, verbose).await,
        Commands::Suggest { input } => cmd_suggest(input, verbose).await,
        Commands::Analyze { prompt } => cmd_analyze(prompt, verbose).await,
        Commands::Refine { prompt, model } => cmd_refine(prompt, model, verbose).await,
        Commands::Optimize {
            idea,
            model,
            current,
        } => cmd_optimize(idea, model, current, verbose).await,
        Commands::Magic { word, model } => cmd_magic(word, model, verbose).await,
        Commands::Variations { story, model } => cmd_variations(story, model, verbose).await,
        Commands::Elements { story, model } => cmd_elements(story, model, verbose).await,
    }
}

/// Remote, then direct, then local; capabilities are re-probed per operation
fn build_router(config: &Config) -> EnvironmentRouter {
    let timeout = config.route_timeout();
    let probe = HttpEnvironmentProbe::new(config.remote_url(), config.openai_api_key.is_some());
    let mut router = EnvironmentRouter::new(Arc::new(probe)).with_timeout(timeout);

    if let Some(url) = config.remote_url() {
        router = router.with_remote(Arc::new(RemoteRoute::new(url, timeout)));
    }

    if let Some(key) = &config.openai_api_key {
        let mut provider = OpenAiProvider::with_timeout(key.clone(), timeout);
        if let Some(base_url) = &config.openai_base_url {
            provider = provider.with_base_url(base_url);
        }
        router = router.with_direct(Arc::new(GenerativeAssistant::new(Arc::new(provider))));
    }

    router
}

fn load_router() -> Result<EnvironmentRouter> {
    let config = Config::load_with_env()?;
    Ok(build_router(&config))
}

/// Degraded answers print their note; verbose mode also names the route
fn report<T>(routed: &Routed<T>, verbose: bool) {
    if let Some(note) = &routed.note {
        eprintln!("{} {}", "⚠".yellow(), note.yellow());
    }
    if verbose {
        eprintln!("{}", format!("(answered by {} route)", routed.route).dimmed());
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_generate(
    idea: String,
    model: String,
    fragments: FragmentOverrides,
    show_template: bool,
    verbose: bool,
) -> Result<()> {
    let request = PromptRequest::new(idea, &model, fragments)?;
    let router = load_router()?;

    let routed = router.render(&request).await?;
    report(&routed, verbose);

    if show_template {
        println!("{} {}", "Template for".bold(), request.model.display_name().bold());
        println!("{}\n", routed.value.raw_template.dimmed());
    }
    println!("{}", routed.value.assembled_prompt);

    Ok(())
}

async fn cmd_templates(use_id: Option<String>, verbose: bool) -> Result<()> {
    let Some(id) = use_id else {
        println!("{}", "Templates:".bold());
        for preset in promptreel::presets() {
            println!(
                "  {} {} ({})",
                preset.id.cyan(),
                preset.name,
                preset.model.display_name().dimmed()
            );
            println!("    {}", preset.description.dimmed());
        }
        println!("\n{}", "Render one with:".dimmed());
        println!("  promptreel templates --use <ID>");
        return Ok(());
    };

    let Some(preset) = promptreel::find_preset(&id) else {
        bail!("Unknown template '{}'. Run `promptreel templates` to list them.", id);
    };

    let routed = load_router()?.render(&preset.request()).await?;
    report(&routed, verbose);
    println!("{}", routed.value.assembled_prompt);

    Ok(())
}

async fn cmd_suggest(input: String, verbose: bool) -> Result<()> {
    let routed = load_router()?.suggestions(&input).await?;
    report(&routed, verbose);

    if routed.value.is_empty() {
        println!("No suggestions. Try a longer idea.");
        return Ok(());
    }
    for suggestion in &routed.value {
        println!("  {} {}", "•".cyan(), suggestion);
    }

    Ok(())
}

async fn cmd_analyze(prompt: String, verbose: bool) -> Result<()> {
    let routed = load_router()?.analyze(&prompt).await?;
    report(&routed, verbose);

    let analysis = &routed.value;
    println!("{} {}/100", "Score:".bold(), score_colored(analysis.score));
    for point in &analysis.feedback {
        println!("  {} {}", "-".dimmed(), point);
    }

    Ok(())
}

async fn cmd_refine(prompt: String, model: String, verbose: bool) -> Result<()> {
    let routed = load_router()?.refine(&prompt, &model).await?;
    report(&routed, verbose);
    println!("{}", routed.value);
    Ok(())
}

async fn cmd_optimize(
    idea: String,
    model: String,
    current: Option<String>,
    verbose: bool,
) -> Result<()> {
    let routed = load_router()?
        .optimize(&idea, &model, current.as_deref())
        .await?;
    report(&routed, verbose);

    let result = &routed.value;
    println!(
        "{} {}/100",
        "Quality:".bold(),
        score_colored(result.quality_score)
    );
    println!("{}\n", result.optimized_prompt);

    if !result.improvements.is_empty() {
        println!("{}", "Improvements:".bold());
        for improvement in &result.improvements {
            println!("  {} {}", "-".dimmed(), improvement);
        }
    }

    if !result.suggestions.is_empty() {
        println!("\n{}", "Alternatives:".bold());
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            println!(
                "  {}. [{}] {}",
                i + 1,
                score_colored(suggestion.score),
                truncate_string(&suggestion.prompt, 120)
            );
            if verbose && !suggestion.reasoning.is_empty() {
                println!("     {}", suggestion.reasoning.dimmed());
            }
        }
    }

    Ok(())
}

async fn cmd_magic(word: String, model: String, verbose: bool) -> Result<()> {
    let routed = load_router()?.magic_story(&word, &model).await?;
    report(&routed, verbose);

    let story = &routed.value.story;
    println!("{}", "Story:".bold());
    println!("  {}\n", story.full_story);
    println!("  {} {}", "Mood:".cyan(), story.story_mood);
    println!("  {} {}", "Character:".cyan(), story.character_details);
    println!("  {} {}", "Action:".cyan(), story.action_sequence);
    println!("\n{}", "Prompt:".bold());
    println!("{}", routed.value.prompt.assembled_prompt);

    Ok(())
}

async fn cmd_variations(story: String, model: String, verbose: bool) -> Result<()> {
    let routed = load_router()?.story_variations(&story, &model).await?;
    report(&routed, verbose);

    if routed.value.is_empty() {
        println!("No variations available.");
        return Ok(());
    }
    for (i, variation) in routed.value.iter().enumerate() {
        println!("  {}. {}", i + 1, variation);
    }

    Ok(())
}

async fn cmd_elements(story: String, model: String, verbose: bool) -> Result<()> {
    let routed = load_router()?.cinematic_elements(&story, &model).await?;
    report(&routed, verbose);

    let elements = &routed.value;
    for (label, value) in [
        ("Visual style", &elements.visual_style),
        ("Camera movement", &elements.camera_movement),
        ("Background", &elements.background),
        ("Lighting mood", &elements.lighting_mood),
        ("Audio cues", &elements.audio_cues),
        ("Color palette", &elements.color_palette),
    ] {
        println!("  {} {}", format!("{}:", label).cyan(), value);
    }

    Ok(())
}

async fn cmd_config(action: ConfigAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ConfigAction::Show => {
            let effective = config.clone().with_overrides(|key| std::env::var(key).ok());

            println!("{}", "Configuration:".bold());
            println!("  Path: {:?}", Config::config_path()?);
            println!(
                "  Server URL: {}",
                effective.remote_url().unwrap_or("None").cyan()
            );
            println!(
                "  OpenAI Key: {}",
                if effective.openai_api_key.is_some() {
                    "Set".green()
                } else {
                    "Not set".red()
                }
            );
            if let Some(base_url) = &effective.openai_base_url {
                println!("  OpenAI Base URL: {}", base_url);
            }
            println!("  Timeout: {}s", effective.timeout_secs);
        }

        ConfigAction::SetUrl { url } => {
            config.set_base_url(url);
            if let Some(url) = config.remote_url() {
                print!("Testing connection... ");
                match RemoteRoute::new(url, config.route_timeout()).health().await {
                    Ok(health) => println!(
                        "{} (v{}, {}, AI adapter {})",
                        "OK".green(),
                        health.version,
                        health.status,
                        if health.direct_adapter { "on" } else { "off" }
                    ),
                    Err(_) => println!(
                        "{}",
                        "Unreachable (saved anyway; other routes will be used)".yellow()
                    ),
                }
            }
            config.save()?;
            println!("{} Server URL saved", "✓".green());
        }

        ConfigAction::SetKey { key } => {
            let api_key = match key {
                Some(k) => k,
                None => Password::new()
                    .with_prompt("OpenAI API Key")
                    .interact()
                    .context("Failed to read API key")?,
            };
            if api_key.trim().is_empty() {
                bail!("API key must not be empty");
            }

            config.set_api_key(api_key.trim().to_string());
            config.save()?;
            println!(
                "{} API key saved to {:?}",
                "✓".green(),
                Config::config_path()?
            );
        }

        ConfigAction::SetTimeout { secs } => {
            if secs == 0 {
                bail!("Timeout must be at least 1 second");
            }
            config.set_timeout(secs);
            config.save()?;
            println!("{} Timeout set to {}s", "✓".green(), secs);
        }
    }

    Ok(())
}

// ============================================
// Helpers
// ============================================

fn score_colored(score: u8) -> colored::ColoredString {
    let text = score.to_string();
    match score {
        80..=100 => text.green(),
        50..=79 => text.yellow(),
        _ => text.red(),
    }
}

fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_counts_chars() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("ééééé", 3), "ééé...");
    }

    #[test]
    fn test_cli_parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "promptreel",
            "generate",
            "a red kite",
            "-m",
            "pika",
            "--visual-style",
            "noir",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                idea,
                model,
                visual_style,
                ..
            } => {
                assert_eq!(idea, "a red kite");
                assert_eq!(model, "pika");
                assert_eq!(visual_style.as_deref(), Some("noir"));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_cli_parses_templates_use() {
        let cli = Cli::try_parse_from(["promptreel", "templates", "--use", "runway-abstract"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Templates { use_id: Some(ref id) } if id == "runway-abstract"
        ));

        let cli = Cli::try_parse_from(["promptreel", "templates"]).unwrap();
        assert!(matches!(cli.command, Commands::Templates { use_id: None }));
    }

    #[tokio::test]
    async fn test_offline_router_renders_presets() {
        let config = Config {
            base_url: String::new(),
            openai_api_key: None,
            openai_base_url: None,
            timeout_secs: 1,
        };
        let router = build_router(&config);

        for preset in promptreel::presets() {
            let routed = router.render(&preset.request()).await.unwrap();
            assert!(routed.value.assembled_prompt.contains(&preset.idea));
            assert!(!routed.value.assembled_prompt.contains('{'));
        }
    }

    #[tokio::test]
    async fn test_offline_router_answers_locally() {
        let config = Config {
            base_url: String::new(),
            openai_api_key: None,
            openai_base_url: None,
            timeout_secs: 1,
        };
        let router = build_router(&config);

        let routed = router.magic_story("cat", "veo3").await.unwrap();
        assert!(routed.is_degraded());
        assert!(routed.note.is_some());
        assert!(routed.value.story.full_story.contains("tabby cat"));

        let request = PromptRequest::new("a cat", "flow", FragmentOverrides::default()).unwrap();
        let rendered = router.render(&request).await.unwrap();
        assert!(rendered.value.assembled_prompt.contains("a cat"));
    }
}
