mod stored;

use anyhow::Context;
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use urania::points::canonical_name;
use urania::source::{fetch_raw_chart, RawChartFile};
use urania::{
    AspectClassifier, AspectTable, BirthData, CompositeReport, NatalChart, RawChart, SynastryReport,
    TransitReport,
};
use urania_config::UraniaSettings;

use crate::stored::{filter_stored, StoredChart};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Settings file (default: configs/urania.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Natal chart from precomputed raw point records.
    Natal {
        /// Raw chart JSON (`{"points": {...}, "houses": {...}}`).
        #[arg(long)]
        points: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long)]
        city: String,
        /// Local birth time, e.g. 1990-04-05T14:30:00.
        #[arg(long)]
        datetime: NaiveDateTime,
        #[arg(long)]
        lat: Option<f64>,
        #[arg(long)]
        lon: Option<f64>,
    },
    /// Transits at a moment to a stored natal chart.
    Transits {
        /// Stored chart JSON (`{"id", "name", "planets"}`).
        #[arg(long)]
        natal: PathBuf,
        /// Raw chart JSON with the transiting positions.
        #[arg(long)]
        points: PathBuf,
        /// Transit moment, RFC 3339.
        #[arg(long)]
        at: DateTime<Utc>,
    },
    /// Cross-aspects between two stored charts.
    Synastry {
        #[arg(long)]
        chart1: PathBuf,
        #[arg(long)]
        chart2: PathBuf,
    },
    /// Midpoint composite of two stored charts.
    Composite {
        #[arg(long)]
        chart1: PathBuf,
        #[arg(long)]
        chart2: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings =
        urania_config::load_settings(args.config.as_deref()).context("loading settings")?;

    let env = env_logger::Env::default().default_filter_or(settings.log_filter.as_str());
    env_logger::Builder::from_env(env).init();

    let table = AspectTable::standard()
        .with_overrides(&settings.orbs)
        .context("applying orb overrides from settings")?;
    let classifier = AspectClassifier::new(table);

    match args.command {
        Command::Natal {
            points,
            name,
            city,
            datetime,
            lat,
            lon,
        } => {
            let subject = BirthData {
                name,
                birth_datetime: datetime,
                city,
                latitude: lat,
                longitude: lon,
            };
            let raw = load_raw(points, &subject, &settings).await;
            print_report(&NatalChart::assemble(subject, raw.as_ref(), &classifier))
        }
        Command::Transits { natal, points, at } => {
            let natal = load_stored(&natal, &settings).await?;
            log::info!("Transits to '{}' ({})", natal.name, natal.id);
            let raw = load_raw(points, &transit_subject(&natal.name, at), &settings).await;
            print_report(&TransitReport::calculate(
                &natal.planets,
                raw.as_ref(),
                at,
                &classifier,
            ))
        }
        Command::Synastry { chart1, chart2 } => {
            let a = load_stored(&chart1, &settings).await?;
            let b = load_stored(&chart2, &settings).await?;
            print_report(&SynastryReport::calculate(
                a.chart_ref(),
                &a.planets,
                b.chart_ref(),
                &b.planets,
                &classifier,
            ))
        }
        Command::Composite { chart1, chart2 } => {
            let a = load_stored(&chart1, &settings).await?;
            let b = load_stored(&chart2, &settings).await?;
            print_report(&CompositeReport::calculate(
                a.chart_ref(),
                &a.planets,
                b.chart_ref(),
                &b.planets,
            ))
        }
    }
}

async fn load_stored(path: &Path, settings: &UraniaSettings) -> anyhow::Result<StoredChart> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading stored chart {}", path.display()))?;
    let mut chart: StoredChart = serde_json::from_str(&text)
        .with_context(|| format!("parsing stored chart {}", path.display()))?;
    filter_stored(&mut chart.planets, &settings.include_points);
    Ok(chart)
}

/// Raw records through the file source. A missing or unreadable file becomes
/// an unavailable upstream, not a hard failure.
async fn load_raw(
    path: PathBuf,
    subject: &BirthData,
    settings: &UraniaSettings,
) -> Option<RawChart> {
    let source = RawChartFile::new(path);
    fetch_raw_chart(&source, subject)
        .await
        .map(|raw| filter_raw(raw, settings))
}

/// The request a source sees for a transit moment.
fn transit_subject(natal_name: &str, at: DateTime<Utc>) -> BirthData {
    BirthData {
        name: format!("Transits for {}", natal_name),
        birth_datetime: at.naive_utc(),
        city: String::new(),
        latitude: None,
        longitude: None,
    }
}

fn filter_raw(mut raw: RawChart, settings: &UraniaSettings) -> RawChart {
    if !settings.include_points.is_empty() {
        raw.points
            .retain(|key, _| settings.include_points.contains(&canonical_name(key)));
    }
    raw
}

fn print_report<T: Serialize>(report: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("serializing report")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn settings_keeping(names: &[&str]) -> UraniaSettings {
        UraniaSettings {
            include_points: names.iter().map(|n| n.to_string()).collect(),
            ..UraniaSettings::default()
        }
    }

    #[test]
    fn test_transit_subject() {
        let at = Utc.with_ymd_and_hms(2024, 7, 29, 12, 0, 0).unwrap();
        let subject = transit_subject("Alex", at);

        assert_eq!(subject.name, "Transits for Alex");
        assert_eq!(subject.birth_datetime, at.naive_utc());
        assert!(subject.latitude.is_none());
    }

    #[tokio::test]
    async fn test_load_raw_goes_through_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "points": {{ "sun": {{ "abs_pos": 45.0 }}, "moon": {{ "abs_pos": 122.0 }} }} }}"#
        )
        .unwrap();
        let at = Utc.with_ymd_and_hms(2024, 7, 29, 12, 0, 0).unwrap();
        let subject = transit_subject("Alex", at);

        let raw = load_raw(file.path().to_path_buf(), &subject, &settings_keeping(&["Sun"]))
            .await
            .unwrap();

        assert_eq!(raw.points.keys().collect::<Vec<_>>(), vec!["sun"]);
    }

    #[tokio::test]
    async fn test_load_raw_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let at = Utc.with_ymd_and_hms(2024, 7, 29, 12, 0, 0).unwrap();

        let raw = load_raw(
            dir.path().join("absent.json"),
            &transit_subject("Alex", at),
            &UraniaSettings::default(),
        )
        .await;

        assert!(raw.is_none());
    }
}
