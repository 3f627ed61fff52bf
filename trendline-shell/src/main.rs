//! Command line tool detecting trendlines in a candle table

use dotenv::dotenv;
use std::fs::File;
use std::io::BufReader;
use structopt::StructOpt;
use trendline::report;
use trendline_morph::{detect, get_pivots, DetectConfig, Threshold, TrendSelection, TrendType};
use trendline_shell::{load_candles, parse_scan_from, Error, Result};
use trendline_utils::Interval;

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = Opt::from_args();
    match opt.cmd {
        Command::Detect {
            input,
            trend,
            min_points,
            scan_from,
            first_pivot,
            last_pivot,
            all_pivots,
            global_extremum,
            keep_breakouts,
            max_error,
            format,
        } => {
            let series = load_candles(BufReader::new(File::open(&input.file)?), input.interval)?;
            let mut cfg = DetectConfig {
                first_pt_must_be_pivot: first_pivot,
                last_pt_must_be_pivot: last_pivot,
                all_pts_must_be_pivots: all_pivots,
                trendline_must_include_global_maxmin_pt: global_extremum,
                min_points_required: min_points,
                ignore_breakouts: !keep_breakouts,
                ..Default::default()
            };
            if let Some(s) = scan_from {
                cfg.scan_from = parse_scan_from(&s)?;
            }
            if let Some(err) = max_error {
                cfg.thresholds.max_error_pt_to_trend = Some(Threshold::fixed(err));
            }
            log::debug!("detect config: {:?}", cfg);

            let detection = detect(&series, trend, &cfg)?;
            match &format[..] {
                "json" => println!("{}", serde_json::to_string_pretty(&report::rows(&detection))?),
                "summary" => {
                    for line in report::summary_lines(&detection) {
                        println!("{}", line);
                    }
                }
                _ => return Err(Error::Input(format!("unknown format {}", format))),
            }
        }
        Command::Pivots { input, trend } => {
            let series = load_candles(BufReader::new(File::open(&input.file)?), input.interval)?;
            let pivots = get_pivots(&series, trend, &DetectConfig::default())?;
            println!("{}", serde_json::to_string(&pivots)?);
        }
    }
    Ok(())
}

#[derive(Debug, StructOpt)]
#[structopt(name = "trendline-shell", about = "detect support and resistance trendlines")]
struct Opt {
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
struct Input {
    #[structopt(short, long, env = "TRENDLINE_FILE", help = "candle table with a header row")]
    file: String,
    #[structopt(short, long, env = "TRENDLINE_INTERVAL", default_value = "1d")]
    interval: Interval,
}

#[derive(Debug, StructOpt)]
enum Command {
    Detect {
        #[structopt(flatten)]
        input: Input,
        #[structopt(short, long, env = "TRENDLINE_TREND", default_value = "BOTH")]
        trend: TrendSelection,
        #[structopt(long, env = "TRENDLINE_MIN_POINTS", default_value = "3")]
        min_points: usize,
        #[structopt(long, env = "TRENDLINE_SCAN_FROM", help = "first scanned position or timestamp")]
        scan_from: Option<String>,
        #[structopt(long)]
        first_pivot: bool,
        #[structopt(long)]
        last_pivot: bool,
        #[structopt(long)]
        all_pivots: bool,
        #[structopt(long, help = "require a global max/min point on every line")]
        global_extremum: bool,
        #[structopt(long)]
        keep_breakouts: bool,
        #[structopt(long, env = "TRENDLINE_MAX_ERROR")]
        max_error: Option<f64>,
        #[structopt(long, env = "TRENDLINE_FORMAT", default_value = "summary")]
        format: String,
    },
    Pivots {
        #[structopt(flatten)]
        input: Input,
        #[structopt(short, long, env = "TRENDLINE_TREND", default_value = "SUPPORT")]
        trend: TrendType,
    },
}
