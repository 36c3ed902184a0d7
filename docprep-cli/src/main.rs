use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docprep::operations::{
    convert_pdfs_with_pdfium, pick_with_ground_truth, sample_files, split_dataset,
    ConvertOptions, PickOptions, SplitSpec, SplitTargets, DEFAULT_DPI,
};
use docprep::ProgressInfo;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docprep",
    about = "Prepare document image datasets: convert, filter, sample and split",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the first page of every PDF in a directory to a grayscale PNG
    #[command(name = "pdf2image")]
    Pdf2Image {
        /// Path to the PDF directory
        #[arg(long = "src_path")]
        src_path: PathBuf,

        /// Path to the output directory
        #[arg(long = "out_path")]
        out_path: PathBuf,

        /// Rendering resolution
        #[arg(long, default_value_t = DEFAULT_DPI)]
        dpi: u16,
    },

    /// Copy the source files that have a matching ground-truth file
    PickWithGt {
        /// Path to the source folder
        #[arg(long = "src_path")]
        src_path: PathBuf,

        /// Path to the ground-truth folder
        #[arg(long = "gt_path")]
        gt_path: PathBuf,

        /// Destination folder for matched source files
        #[arg(long = "des_path")]
        des_path: PathBuf,

        /// Destination folder for matched ground-truth files
        #[arg(long = "des_gt_path")]
        des_gt_path: Option<PathBuf>,

        /// Strip the last segment after this delimiter from ground-truth names
        #[arg(long = "remove_gt_tail")]
        remove_gt_tail: Option<String>,
    },

    /// Copy N randomly drawn files to a destination folder
    Sample {
        /// Path to the source folder
        #[arg(long = "src_path")]
        src_path: PathBuf,

        /// Path to the destination folder
        #[arg(long = "des_path")]
        des_path: PathBuf,

        /// Number of files to copy
        #[arg(long)]
        num: usize,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Split a dataset into train, test and optional eval sets
    Split {
        /// Path to the dataset directory
        #[arg(long = "src_dir")]
        src_dir: PathBuf,

        /// Path to the train directory
        #[arg(long = "train_dir")]
        train_dir: PathBuf,

        /// Path to the test directory
        #[arg(long = "test_dir")]
        test_dir: PathBuf,

        /// Path to the eval directory
        #[arg(long = "eval_dir")]
        eval_dir: Option<PathBuf>,

        /// Size of the test set (takes precedence over ratios)
        #[arg(long = "test_size")]
        test_size: Option<usize>,

        /// Size of the eval set
        #[arg(long = "eval_size", default_value_t = 0)]
        eval_size: usize,

        /// Ratio of the test set
        #[arg(long = "test_ratio")]
        test_ratio: Option<f64>,

        /// Ratio of the eval set
        #[arg(long = "eval_ratio", default_value_t = 0.0)]
        eval_ratio: f64,

        /// Seed for a reproducible split
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Pick the split mode from the flags; a non-zero exact test size wins
fn resolve_split_spec(
    test_size: Option<usize>,
    eval_size: usize,
    test_ratio: Option<f64>,
    eval_ratio: f64,
) -> Option<SplitSpec> {
    match (test_size, test_ratio) {
        (Some(test), _) if test > 0 => Some(SplitSpec::Counts {
            test,
            eval: eval_size,
        }),
        (_, Some(test)) => Some(SplitSpec::Ratios {
            test,
            eval: eval_ratio,
        }),
        _ => None,
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_files(title: &str, files: &[String]) {
    println!();
    println!("{title} : ");
    println!();
    println!("{files:?}");
    println!();
    println!("Total {} files.", files.len());
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    tracing::debug!("docprep {}", docprep::VERSION);

    match cli.command {
        Commands::Pdf2Image {
            src_path,
            out_path,
            dpi,
        } => {
            let options = ConvertOptions::default().with_dpi(dpi);
            let report_progress = |info: &ProgressInfo| {
                print!("\r{}", info.format_progress());
                let _ = std::io::stdout().flush();
            };

            let summary =
                convert_pdfs_with_pdfium(&src_path, &out_path, &options, Some(&report_progress))
                    .with_context(|| {
                        format!("Failed to convert PDFs in {}", src_path.display())
                    })?;

            println!();
            println!("{summary}");
        }

        Commands::PickWithGt {
            src_path,
            gt_path,
            des_path,
            des_gt_path,
            remove_gt_tail,
        } => {
            let mut options = PickOptions::default();
            if let Some(dir) = des_gt_path {
                options = options.with_gt_destination(dir);
            }
            if let Some(delimiter) = remove_gt_tail {
                options = options.with_remove_gt_tail(delimiter);
            }

            let result = pick_with_ground_truth(&src_path, &gt_path, &des_path, &options)
                .with_context(|| {
                    format!(
                        "Failed to pick files from {} with ground truth in {}",
                        src_path.display(),
                        gt_path.display()
                    )
                })?;

            print_files("Files copied", &result.copied_files);
            if options.gt_destination.is_some() {
                print_files("Ground truth files copied", &result.copied_gt_files);
            }
        }

        Commands::Sample {
            src_path,
            des_path,
            num,
            seed,
        } => {
            let copied = sample_files(&src_path, &des_path, num, &mut make_rng(seed))
                .with_context(|| format!("Failed to sample files from {}", src_path.display()))?;

            print_files("Files copied", &copied);
        }

        Commands::Split {
            src_dir,
            train_dir,
            test_dir,
            eval_dir,
            test_size,
            eval_size,
            test_ratio,
            eval_ratio,
            seed,
        } => {
            let mut targets = SplitTargets::new(train_dir, test_dir);
            if let Some(dir) = eval_dir {
                targets = targets.with_eval_dir(dir);
            }
            let spec = resolve_split_spec(test_size, eval_size, test_ratio, eval_ratio);

            let split = split_dataset(&src_dir, &targets, spec, &mut make_rng(seed))
                .with_context(|| format!("Failed to split {}", src_dir.display()))?;

            match split {
                Some(split) => {
                    println!("train_files : {}", split.train.len());
                    println!("test_files : {}", split.test.len());
                    println!("eval_files : {}", split.eval.len());
                }
                None => {
                    println!("No split performed: pass --test_size or --test_ratio");
                }
            }
        }
    }

    Ok(())
}
