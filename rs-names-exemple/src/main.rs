use std::collections::HashSet;
use std::env;

use rs_names_core::corpus::Corpus;
use rs_names_core::{GeneratorConfig, LstmModel, NameGenerator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Usage: rs-names-exemple [model] [race] [group] [count] [corpus_dir]
    let args: Vec<String> = env::args().skip(1).collect();
    let arg = |i: usize, default: &str| args.get(i).cloned().unwrap_or_else(|| default.to_owned());

    let model_path = arg(0, "./models/rnn_layer.bin");
    let race = arg(1, "orc");
    let group = arg(2, "female");
    let count: usize = arg(3, "500").parse()?;

    // Load a trained model (postcard artifact)
    let model = LstmModel::load(&model_path)?;

    // Names are cut after 50 characters, seed letter included
    let generator = NameGenerator::with_config(model, GeneratorConfig { max_length: 50 })?;

    // Generate the whole batch, single-letter names are already filtered out
    let mut names = generator.generate(count, &race, &group)?;
    names.sort_by(|a, b| a.full_name().cmp(&b.full_name()));

    for name in &names {
        println!("{} \t\t{} {}", name.full_name(), name.race, name.group);
    }

    // Count names generated more than once
    let mut seen = HashSet::new();
    let duplicates = names.iter().filter(|name| !seen.insert(name.full_name())).count();
    println!("Duplicates: {}", duplicates);

    // Optionally compare against the training corpus
    if let Some(dir) = args.get(4) {
        let corpus = Corpus::load(dir)?;
        let copied = names.iter().filter(|name| corpus.contains(&name.first)).count();
        println!("First names copied from the corpus: {} / {}", copied, names.len());
    }

    Ok(())
}
