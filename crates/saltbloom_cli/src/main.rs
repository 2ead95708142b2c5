use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::Level;

use saltbloom_core::{
    sizing::{optimal_bits, optimal_hash_count},
    HashFamily, HashFamilyConfig, HashFamilyOverrides, HashFunction, MembershipFilter,
};

const DEFAULT_BITS: usize = 2_400_000;
/// Hash count `check` uses when neither flags, a config file nor `--fpp`
/// decide it. The word-list driver has always used 5 alongside
/// `DEFAULT_BITS`; the library default of 10 applies to `hash`.
const DEFAULT_CHECK_FUNCTIONS: usize = 5;

#[derive(Parser)]
#[command(name = "saltbloom", about = "Salted-digest membership filter driver")]
struct Cli {
    /// Log construction details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Args)]
struct FamilyArgs {
    /// JSON file with `algorithm` / `function_count`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Digest name, e.g. MD5, SHA-256, BLAKE3 (overrides --config)
    #[arg(long)]
    algorithm: Option<String>,
    /// Number of hash functions (overrides --config)
    #[arg(long, value_name = "K")]
    functions: Option<usize>,
}

impl FamilyArgs {
    /// Config file layered under the flags. Fields neither sets stay `None`.
    fn overrides(&self) -> Result<HashFamilyOverrides> {
        let file = match &self.config {
            Some(p) => HashFamilyOverrides::load(p)
                .with_context(|| format!("load config {}", p.display()))?,
            None => HashFamilyOverrides::default(),
        };
        Ok(file.merge(HashFamilyOverrides {
            algorithm: self.algorithm.clone(),
            function_count: self.functions,
        }))
    }

    fn resolve(&self) -> Result<HashFamilyConfig> {
        Ok(self.overrides()?.apply(HashFamilyConfig::default()))
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Load a word list into a filter and compare queries against the list
    Check {
        /// Newline-delimited word list
        #[arg(long)]
        words: PathBuf,
        /// Filter size in bits [default: 2400000]
        #[arg(long, conflicts_with = "fpp")]
        bits: Option<usize>,
        /// Size the filter for this false-positive rate instead of --bits;
        /// also picks the hash count unless --functions or --config sets one.
        /// Without either, 5 hash functions are used.
        #[arg(long)]
        fpp: Option<f64>,
        #[command(flatten)]
        family: FamilyArgs,
        queries: Vec<String>,
    },

    /// Print every hash function's value for VALUE
    Hash {
        #[command(flatten)]
        family: FamilyArgs,
        value: String,
    },

    /// Suggest bits and hash count for an expected load
    Size {
        #[arg(long)]
        items: u64,
        #[arg(long)]
        fpp: f64,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Invalid UTF-8 is replaced rather than rejected, so one bad line does not
/// sink the whole list.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read(path)
        .with_context(|| format!("read word list {}", path.display()))?;
    Ok(String::from_utf8_lossy(&raw)
        .lines()
        .map(str::to_owned)
        .collect())
}

fn run_check(
    words: &Path,
    bits: Option<usize>,
    fpp: Option<f64>,
    family: &FamilyArgs,
    queries: &[String],
) -> Result<()> {
    let lines = read_lines(words)?;
    println!("{}", lines.len());

    let overrides = family.overrides()?;
    let explicit_k = overrides.function_count.is_some();
    let mut cfg = overrides.apply(HashFamilyConfig::default());
    let bits = match fpp {
        Some(p) => {
            let n = (lines.len() as u64).max(1);
            let m = optimal_bits(n, p)?;
            if !explicit_k {
                cfg = cfg.function_count(optimal_hash_count(n, m)?);
            }
            m
        }
        None => {
            if !explicit_k {
                cfg = cfg.function_count(DEFAULT_CHECK_FUNCTIONS);
            }
            bits.unwrap_or(DEFAULT_BITS)
        }
    };

    let fam: HashFamily<str> = HashFamily::with_display(&cfg)?;
    let algorithm = fam.algorithm();
    let filter = MembershipFilter::with_family(bits, fam)?;
    filter.insert_all(lines.iter().map(String::as_str))?;
    tracing::debug!(
        bits = filter.bit_count(),
        hashes = filter.hash_count(),
        %algorithm,
        fill = filter.fill_ratio(),
        "word list loaded"
    );

    let list: HashSet<&str> = lines.iter().map(String::as_str).collect();
    for q in queries {
        let in_list = list.contains(q.as_str());
        let in_filter = filter.contains(q)?;
        println!(
            "Result: {} (value: [{}], existsInList: {}, existsByFilter: {})",
            in_list == in_filter,
            q,
            in_list,
            in_filter
        );
    }

    println!(
        "False positive probability: {}",
        filter.false_positive_probability()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Cmd::Check {
            words,
            bits,
            fpp,
            family,
            queries,
        } => run_check(&words, bits, fpp, &family, &queries)?,
        Cmd::Hash { family, value } => {
            let cfg = family.resolve()?;
            let fam: HashFamily<str> = HashFamily::with_display(&cfg)?;
            println!("{} x{}", fam.algorithm(), fam.len());
            for h in fam.functions() {
                println!("h{} = {}", h.salt(), h.hash(&value)?);
            }
        }
        Cmd::Size { items, fpp } => {
            let bits = optimal_bits(items, fpp)?;
            let k = optimal_hash_count(items, bits)?;
            println!("bits={bits} hashes={k}");
        }
    }
    Ok(())
}
