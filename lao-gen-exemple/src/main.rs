use std::path::Path;

use lao_gen_core::io;
use lao_gen_core::pool::RenderSupport;
use lao_gen_core::segment::{FilterOptions, ProcessingOptions};
use lao_gen_core::{CorpusConfig, filter_chunks};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SAMPLE_TEXT: &str = "ສະບາຍດີ ທ່ານ. ຂ້ອຍຊື່ ສົມສັກ ແລະ ຂ້ອຍມາຈາກ ວຽງຈັນ.\n\
                           ພວກເຮົາ ໄປ ຕະຫຼາດ ນຳກັນ ມື້ອື່ນ ເພາະວ່າ ມື້ນີ້ ຝົນຕົກ.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log level comes from LAO_GEN_LOG, e.g. LAO_GEN_LOG=debug
    let filter = EnvFilter::try_from_env("LAO_GEN_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    // Usage: lao-gen-exemple [document.txt | folder] [draws]
    let mut args = std::env::args().skip(1);
    let source = args.next();
    let draws: usize = match args.next() {
        Some(n) => n.parse()?,
        None => 20,
    };

    // Optional configuration file next to the working directory
    let config = CorpusConfig::load("lao-gen.toml")?;

    // Enumerate the syllable space from the built-in tables
    let space = config.build_generator().generate_syllable_space();
    println!("Consonants: {}", space.stats.consonants);
    println!("Vowel templates: {}", space.stats.vowels);
    println!("Tones: {}", space.stats.tones);
    println!("Syllables: {} of {} possible", space.stats.total_generated, space.stats.total_possible);
    for (n, count) in &space.stats.multi_syllable {
        println!("{}-syllable words: {}", n, count);
    }
    println!("Special variants: {}", space.stats.special_variants);
    println!("Template phrases: {}", space.stats.template_phrases);
    println!("Grand total: {}", space.stats.grand_total);

    // Documents to segment: a file, every .txt of a folder, or the built-in sample
    let documents: Vec<(String, String)> = match source.as_deref() {
        Some(path) if Path::new(path).is_dir() => io::read_folder(path, "txt")?,
        Some(path) => vec![(path.to_owned(), io::read_document(path)?)],
        None => vec![("sample".to_owned(), SAMPLE_TEXT.to_owned())],
    };
    info!("{} document(s) to segment", documents.len());

    let segmenter = config.build_segmenter();
    let options = FilterOptions::from(&ProcessingOptions::default());

    let mut pool = config.build_pool(None);
    pool.set_render_support(RenderSupport { script_supported: true });
    pool.add_generated(&space);

    for (name, text) in &documents {
        let chunks = segmenter.process_text(text);
        let selected = filter_chunks(&chunks, &options);
        let accepted = pool.add_chunks(&selected);
        println!("{}: {} chunks, {} selected, {} accepted as custom texts", name, chunks.len(), selected.len(), accepted);
    }

    let stats = pool.stats();
    println!(
        "Pool: {} custom, {} short, {} medium, {} long",
        stats.custom, stats.short, stats.medium, stats.long
    );

    // Draw texts for the renderer
    for (i, draw) in pool.draw_many(draws).iter().enumerate() {
        match draw.fallback {
            Some(step) => println!("Draw {}: {} ({:?}, fallback {:?})", i + 1, draw.text, draw.category, step),
            None => println!("Draw {}: {} ({:?})", i + 1, draw.text, draw.category),
        }
    }

    let stats = pool.stats();
    println!("{} draws, {} needed a fallback", stats.draws, stats.fallbacks);

    Ok(())
}
