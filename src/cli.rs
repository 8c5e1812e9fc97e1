//! CLI module
//!
//! This module provides the command-line interface for querying SKELL.

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::{
    client::{ClientConfig, SkellClient, DEFAULT_BASE_URL},
    models::{Language, Sentence, WordSketch, WordSketchKind},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Corpus language (English, German, Italian, Czech, Estonian)
    #[arg(short, long, default_value = "English")]
    lang: Language,

    /// SKELL API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show example sentences for a word
    Examples { word: String },

    /// Show the word sketch of a word
    Sketch {
        word: String,

        /// Restrict to a part of speech (name or code, e.g. noun or n)
        #[arg(short, long)]
        pos: Option<WordSketchKind>,
    },

    /// Show words similar to a word
    Similar { word: String },

    /// Show concordances for one collocation of a word sketch
    Concordance {
        word: String,

        /// Part of speech of the headword
        #[arg(short, long)]
        pos: WordSketchKind,

        /// Relation index within the sketch
        #[arg(short, long, default_value_t = 0)]
        relation: usize,

        /// Collocation index within the relation
        #[arg(short, long, default_value_t = 0)]
        collocation: usize,
    },

    /// Run examples, sketch and the first collocation concordance for a word
    Demo {
        #[arg(default_value = "good")]
        word: String,

        #[arg(short, long, default_value = "adjective")]
        pos: WordSketchKind,
    },
}

/// Run the CLI application
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = SkellClient::with_config(ClientConfig {
        base_url: cli.base_url.clone(),
        language: cli.lang,
        ..ClientConfig::default()
    });

    match &cli.command {
        Commands::Examples { word } => {
            let sentences = client.get_examples(word).await?;
            print_heading(&format!("examples of {}", word));
            print_sentences(&sentences);
            Ok(())
        }

        Commands::Sketch { word, pos } => {
            let sketch = client.get_word_sketch(word, *pos).await?;
            print_heading(&format!("word sketch of {}", word));
            print_sketch(&sketch);
            Ok(())
        }

        Commands::Similar { word } => {
            let words = client.get_similar_words(word).await?;
            print_heading(&format!("words similar to {}", word));
            for similar in words {
                println!("  {}", similar);
            }
            Ok(())
        }

        Commands::Concordance {
            word,
            pos,
            relation,
            collocation,
        } => {
            let sketch = client.get_word_sketch(word, Some(*pos)).await?;
            let selected = sketch
                .relation(*relation)
                .and_then(|rel| rel.collocations().nth(*collocation))
                .ok_or_else(|| {
                    format!(
                        "No collocation {} in relation {} of the word sketch",
                        collocation, relation
                    )
                })?;

            let sentences = client.get_concordances_for_collocation(selected).await?;
            print_heading(&format!(
                "concordances of {} ({})",
                selected.pair_key(),
                selected.relation().description()
            ));
            print_sentences(&sentences);
            Ok(())
        }

        Commands::Demo { word, pos } => {
            print_heading(&format!("examples of {}", word));
            print_sentences(&client.get_examples(word).await?);

            let sketch = client.get_word_sketch(word, Some(*pos)).await?;
            print_heading(&format!("word sketch of {}", word));
            print_sketch(&sketch);

            print_heading(&format!("word sketch concordances of {}", word));
            match sketch.collocations().next() {
                Some(collocation) => {
                    println!("{}", collocation.pair_key().bold());
                    print_sentences(&client.get_concordances_for_collocation(collocation).await?);
                }
                None => println!("  No collocations found"),
            }
            Ok(())
        }
    }
}

fn print_heading(title: &str) {
    println!("{}", format!("***** {} *****", title).cyan().bold());
}

fn print_sentences(sentences: &[Sentence]) {
    if sentences.is_empty() {
        println!("  No sentences found");
        return;
    }
    for sentence in sentences {
        println!("{}{}{}", sentence.left(), sentence.kwic().bold(), sentence.right());
    }
}

fn print_sketch(sketch: &WordSketch) {
    if sketch.is_empty() {
        println!("  No grammatical relations found");
        return;
    }
    for relation in sketch.relations() {
        println!("[{}] {}", relation.index(), relation.description().yellow());
        for (i, collocation) in relation.collocations().enumerate() {
            println!(
                "    {}. {} ({})",
                i,
                collocation.pair_key(),
                collocation.lemma_pos()
            );
        }
    }
}
