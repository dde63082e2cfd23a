use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use weo_rs::models::slice_years;
use weo_rs::release::{self, Release};
use weo_rs::{Client, Dataset, Flavor, Frame, YearSpec, address};
use weo_rs::{stats, storage};

#[derive(Parser, Debug)]
#[command(
    name = "weo",
    version,
    about = "Download and query the IMF World Economic Outlook dataset"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every release from 2007-Oct to the latest one.
    Releases {
        /// Print the download address next to each release.
        #[arg(long, default_value_t = false)]
        urls: bool,
        /// Use the commodities table instead of the by-country table.
        #[arg(long, default_value_t = false)]
        commodities: bool,
    },
    /// Print the download address of a release.
    Url {
        /// Release as YYYY-MM, YYYY-Mon or YYYY-Month (e.g. 2019-Oct)
        release: String,
        #[arg(long, default_value_t = false)]
        commodities: bool,
    },
    /// Download one release to a local file.
    Download {
        release: String,
        #[arg(short, long)]
        out: PathBuf,
        /// Replace an existing file.
        #[arg(long, default_value_t = false)]
        overwrite: bool,
        #[arg(long, default_value_t = false)]
        commodities: bool,
    },
    /// Download every release into a directory, skipping files already there.
    DownloadAll {
        #[arg(short, long)]
        dir: PathBuf,
        #[arg(long, default_value_t = false)]
        commodities: bool,
    },
    /// List variables (subject, unit, code).
    Variables {
        file: PathBuf,
        /// Case-insensitive substring of the subject descriptor.
        #[arg(short, long)]
        pattern: Option<String>,
    },
    /// List countries.
    Countries {
        file: PathBuf,
        /// Case-insensitive substring of the country name.
        #[arg(short, long)]
        name: Option<String>,
    },
    /// One variable for all countries.
    Get(GetArgs),
    /// All variables for one country.
    Country {
        file: PathBuf,
        /// Two- or three-letter ISO code
        iso: String,
        #[arg(short, long)]
        year: Option<i32>,
        /// Include every subject, not only the core codes.
        #[arg(long, default_value_t = false)]
        full: bool,
    },
    /// All variables and countries for one year.
    Year {
        file: PathBuf,
        year: i32,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the release a file belongs to, from its footnote.
    Version { file: PathBuf },
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct GetArgs {
    file: PathBuf,
    /// Subject code (e.g., NGDPD). Alternative to --subject/--unit.
    #[arg(short, long, conflicts_with_all = ["subject", "unit"])]
    code: Option<String>,
    /// Subject descriptor (e.g., "Gross domestic product, current prices")
    #[arg(short, long, requires = "unit")]
    subject: Option<String>,
    /// Unit (e.g., "U.S. dollars")
    #[arg(short, long, requires = "subject")]
    unit: Option<String>,
    /// Year (YYYY) or range (YYYY:YYYY)
    #[arg(short = 'y', long)]
    years: Option<String>,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print per-column statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn flavor(commodities: bool) -> Flavor {
    if commodities {
        Flavor::Commodities
    } else {
        Flavor::Countries
    }
}

fn parse_release(s: &str) -> Result<Release> {
    let r = Release::parse(s)?;
    r.validate()?;
    Ok(r)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Releases { urls, commodities } => {
            for r in release::all_releases() {
                if urls {
                    println!("{}\t{}", r, address::address(r, flavor(commodities)));
                } else {
                    println!("{}", r);
                }
            }
        }
        Command::Url {
            release,
            commodities,
        } => {
            let r = parse_release(&release)?;
            println!("{}", address::address(r, flavor(commodities)));
        }
        Command::Download {
            release,
            out,
            overwrite,
            commodities,
        } => {
            let r = parse_release(&release)?;
            let path = Client::new()?.download(r, flavor(commodities), &out, overwrite)?;
            eprintln!(
                "Downloaded {} WEO dataset to {} ({} MB)",
                r,
                path.display(),
                weo_rs::download::size_mb(&path)?
            );
        }
        Command::DownloadAll { dir, commodities } => {
            std::fs::create_dir_all(&dir)?;
            let paths = Client::new()?.download_all(&dir, flavor(commodities))?;
            eprintln!("{} releases in {}", paths.len(), dir.display());
        }
        Command::Variables { file, pattern } => {
            let w = Dataset::open(&file)?;
            for v in w.variables(pattern.as_deref()) {
                println!("{}\t{}\t{}", v.code, v.subject, v.unit);
            }
        }
        Command::Countries { file, name } => {
            let w = Dataset::open(&file)?;
            for c in w.countries(name.as_deref()) {
                println!("{}\t{}\t{}", c.iso, c.weo_code, c.name);
            }
        }
        Command::Get(args) => cmd_get(args)?,
        Command::Country {
            file,
            iso,
            year,
            full,
        } => {
            let w = Dataset::open(&file)?;
            match year {
                Some(y) => {
                    for o in w.country_at(&iso, y, !full)? {
                        println!("{}\t{}\t{}", o.code, fmt_opt(o.value), o.description);
                    }
                }
                None => print_frame(&w.country(&iso, !full)?),
            }
        }
        Command::Year { file, year, out } => {
            let w = Dataset::open(&file)?;
            let frame = w.fix_year(year)?;
            match out {
                Some(path) => save(&frame, "code", &path, None)?,
                None => print_frame(&frame),
            }
        }
        Command::Version { file } => {
            let (year, month) = weo_rs::table::version(&file)?;
            println!("{} {}", month, year);
        }
    }
    Ok(())
}

fn print_frame(frame: &Frame) {
    println!("\t{}", frame.columns.join("\t"));
    for (label, row) in frame.index.iter().zip(&frame.data) {
        let cells: Vec<String> = row.iter().map(|v| fmt_opt(*v)).collect();
        println!("{}\t{}", label, cells.join("\t"));
    }
}

fn save(frame: &Frame, index_name: &str, path: &Path, format: Option<OutFormat>) -> Result<()> {
    let fmt = match format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(frame, index_name, path)?,
        "json" => storage::save_json(frame, path)?,
        other => anyhow::bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} rows to {}", frame.index.len(), path.display());
    Ok(())
}

fn cmd_get(args: GetArgs) -> Result<()> {
    let w = Dataset::open(&args.file)?;
    let mut frame = match (&args.code, &args.subject, &args.unit) {
        (Some(code), _, _) => w.getc(code)?,
        (None, Some(subject), Some(unit)) => w.get(subject, unit)?,
        _ => anyhow::bail!("either --code or both --subject and --unit are required"),
    };
    let mut index_name = "year";
    if let Some(s) = &args.years {
        let spec = YearSpec::parse(s)
            .ok_or_else(|| anyhow::anyhow!("invalid --years, expected YYYY or YYYY:YYYY"))?;
        frame = slice_years(&frame, spec)?;
        index_name = w.id_column();
    }

    if args.stats {
        for s in stats::column_summary(&frame) {
            println!(
                "{}  count={} missing={}  min={} max={} mean={} median={}",
                s.column,
                s.count,
                s.missing,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    match args.out.as_ref() {
        Some(path) => save(&frame, index_name, path, args.format)?,
        None if !args.stats => print_frame(&frame),
        None => {}
    }
    Ok(())
}
