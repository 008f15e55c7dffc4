use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ribomethseq::alignment::BamAlignmentSource;
use ribomethseq::pipeline::{count_bam_to_wiggles, end_count_paths, score_wiggle_file};
use ribomethseq::{ScoreMethod, ScoringConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ribomethseq", about = "RiboMethSeq read-end counting and methylation scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Count fragment 5' and 3' ends for one chromosome of an indexed BAM file.
    Count {
        /// Coordinate-sorted, indexed BAM file.
        bam: PathBuf,
        /// Chromosome to count.
        #[arg(long)]
        chrom: String,
        /// Prefix for the `.5prime.wig`, `.3prime.wig` and `.total.wig` outputs.
        #[arg(long)]
        out_prefix: PathBuf,
    },
    /// Score a count track produced by `count`.
    Score {
        /// Input count track (variableStep wiggle).
        counts: PathBuf,
        /// Output score track.
        output: PathBuf,
        /// Chromosome the count track must describe.
        #[arg(long)]
        chrom: String,
        /// Score formula.
        #[arg(long, value_enum, default_value_t = ScoreMethod::A)]
        method: ScoreMethod,
        /// Positions on each side of the scored position.
        #[arg(long, default_value_t = 6)]
        flank_width: usize,
        /// Write scores at full precision instead of four decimals.
        #[arg(long)]
        no_round: bool,
    },
    /// List the chromosomes in a BAM header.
    Chroms {
        /// BAM file to inspect.
        bam: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Count {
            bam,
            chrom,
            out_prefix,
        } => run_count(bam, chrom, out_prefix)?,
        Commands::Score {
            counts,
            output,
            chrom,
            method,
            flank_width,
            no_round,
        } => run_score(counts, output, chrom, method, flank_width, no_round)?,
        Commands::Chroms { bam } => run_chroms(bam)?,
    }

    Ok(())
}

fn run_count(bam: PathBuf, chrom: String, out_prefix: PathBuf) -> Result<()> {
    count_bam_to_wiggles(&bam, &chrom, &out_prefix).with_context(|| {
        format!(
            "failed to count {} in {} (partial outputs under {} are invalid)",
            chrom,
            bam.display(),
            out_prefix.display()
        )
    })?;

    for path in end_count_paths(&out_prefix) {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_score(
    counts: PathBuf,
    output: PathBuf,
    chrom: String,
    method: ScoreMethod,
    flank_width: usize,
    no_round: bool,
) -> Result<()> {
    let config = ScoringConfig::new(method)
        .with_flank_width(flank_width)
        .context("invalid scoring configuration")?
        .with_rounding(!no_round);

    let scored = score_wiggle_file(&counts, &output, &chrom, &config).with_context(|| {
        format!(
            "failed to score {} (partial output {} is invalid)",
            counts.display(),
            output.display()
        )
    })?;

    println!("{}\t{}\t{}", chrom, scored, output.display());
    Ok(())
}

fn run_chroms(bam: PathBuf) -> Result<()> {
    let source = BamAlignmentSource::open(&bam)
        .with_context(|| format!("failed to open {}", bam.display()))?;
    for name in source.chromosomes() {
        println!("{}", name);
    }
    Ok(())
}
