use std::ops::RangeInclusive;
use std::path::PathBuf;

use bazi_almanac::{Almanac, CalendarPrimitive, Gender, HourBoundaryMode, RawPillar};
use bazi_engine::{
    BirthSpecification, ChartConfig, ChartResult, Engine, EngineConfig, MonthMode, TimeMode,
};
use bazi_time::{format_civil, parse_civil};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bazi", about = "Four-pillar chart CLI")]
struct Cli {
    /// Log at debug level (otherwise RUST_LOG, default warn)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Arrange a four-pillar chart
    Arrange {
        /// Birth wall clock: YYYY-MM-DD HH:MM:SS
        #[arg(long)]
        datetime: String,
        /// Calendar of the literal: solar or lunisolar
        #[arg(long, default_value = "solar")]
        calendar: String,
        /// The lunisolar month is the intercalary one
        #[arg(long)]
        leap_month: bool,
        /// male or female
        #[arg(long, default_value = "male")]
        gender: String,
        /// Degrees east
        #[arg(long, requires = "latitude")]
        longitude: Option<f64>,
        /// Degrees north
        #[arg(long, requires = "longitude")]
        latitude: Option<f64>,
        /// Place name from the gazetteer
        #[arg(long, conflicts_with = "longitude")]
        location: Option<String>,
        /// true_solar or mean_solar
        #[arg(long)]
        time_mode: Option<String>,
        /// solar_term or lunar_month
        #[arg(long)]
        month_mode: Option<String>,
        /// late_zi_same_day or next_day_at_23
        #[arg(long)]
        zi_mode: Option<String>,
        /// Expand years to months and days: YYYY or FROM..TO
        #[arg(long)]
        expand: Option<String>,
        /// Name recorded with the request
        #[arg(long)]
        name: Option<String>,
        /// Print the full chart as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the 24 solar terms of a civil year
    Terms {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        json: bool,
    },
    /// Lunisolar date and day pillar of a civil date
    Lunar {
        /// YYYY-MM-DD or YYYY-MM-DD HH:MM:SS
        #[arg(long)]
        datetime: String,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with(message: String) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn load_config(path: Option<&PathBuf>) -> EngineConfig {
    match path {
        Some(p) => EngineConfig::load(p).unwrap_or_else(|e| exit_with(format!("{e}"))),
        None => EngineConfig::default(),
    }
}

fn parse_gender(s: &str) -> Gender {
    match s.to_lowercase().as_str() {
        "male" | "m" | "男" => Gender::Male,
        "female" | "f" | "女" => Gender::Female,
        _ => exit_with(format!("Invalid gender: {s} (male or female)")),
    }
}

fn parse_time_mode(s: &str) -> TimeMode {
    match s {
        "true_solar" => TimeMode::TrueSolar,
        "mean_solar" => TimeMode::MeanSolar,
        _ => exit_with(format!("Invalid time mode: {s} (true_solar or mean_solar)")),
    }
}

fn parse_month_mode(s: &str) -> MonthMode {
    match s {
        "solar_term" => MonthMode::SolarTerm,
        "lunar_month" => MonthMode::LunarMonth,
        _ => exit_with(format!("Invalid month mode: {s} (solar_term or lunar_month)")),
    }
}

fn parse_zi_mode(s: &str) -> HourBoundaryMode {
    match s {
        "late_zi_same_day" => HourBoundaryMode::LateZiSameDay,
        "next_day_at_23" => HourBoundaryMode::NextDayAt23,
        _ => exit_with(format!(
            "Invalid zi mode: {s} (late_zi_same_day or next_day_at_23)"
        )),
    }
}

/// `2024` or `2024..2030` (inclusive).
fn parse_year_range(s: &str) -> Result<RangeInclusive<i32>, String> {
    let parse = |t: &str| t.trim().parse::<i32>().map_err(|e| format!("{t}: {e}"));
    match s.split_once("..") {
        Some((a, b)) => Ok(parse(a)?..=parse(b.trim_start_matches('='))?),
        None => {
            let y = parse(s)?;
            Ok(y..=y)
        }
    }
}

fn raw_name(p: &RawPillar) -> String {
    format!("{}{}", p.stem, p.branch)
}

fn print_chart(chart: &ChartResult) {
    let c = &chart.correction;
    println!("Civil:   {}", format_civil(&c.civil));
    if c.dst.applied() {
        println!("DST:     {}", format_civil(&c.dst.corrected));
    }
    println!(
        "Solar:   {} (longitude {:.2}, {:+.2} min)",
        format_civil(&c.instant),
        c.location.longitude,
        c.solar.total_offset_min()
    );
    println!("Lunar:   {}", chart.lunar);
    println!();

    println!("{:<6}{:<6}{:<8}{:<10}{:<8}{:<10}Hidden", "", "Pair", "Role", "Nayin", "Stage", "Void");
    for p in chart.pillars.all() {
        let role = p.ten_god.map_or("日主", |g| g.name());
        let hidden: Vec<String> = p
            .hidden
            .iter()
            .map(|h| format!("{}({})", h.stem, h.ten_god.name()))
            .collect();
        println!(
            "{:<6}{:<6}{:<8}{:<10}{:<8}{}{}    {}",
            p.position.name(),
            p.ganzhi.to_string(),
            role,
            p.nayin.name,
            p.life_stage.name(),
            p.void_branches[0],
            p.void_branches[1],
            hidden.join(" ")
        );
    }
    println!();

    println!(
        "Terms:   {} {} / {} {}",
        chart.terms.prev.term.name(),
        format_civil(&chart.terms.prev.instant),
        chart.terms.next.term.name(),
        format_civil(&chart.terms.next.instant)
    );
    println!("Command: {}", chart.month_command.detail);
    let scores: Vec<String> = chart
        .energy
        .scores
        .iter()
        .map(|s| format!("{}{} {:.2}", s.element.name(), s.status.name(), s.score))
        .collect();
    println!("Energy:  {}", scores.join("  "));
    for i in &chart.interactions {
        let outcome = match (i.element, i.transformed) {
            (Some(_), true) => " (化)",
            (Some(_), false) => " (合而不化)",
            (None, _) => "",
        };
        println!("Interaction: {} {}-{}{}", i.description, i.source, i.target, outcome);
    }
    println!("Geju:    {} [{:?}, {:?}]", chart.geju.name, chart.geju.category, chart.geju.status);
    let s = &chart.strength;
    println!(
        "Strength: {} ({:.2}%), 用 {} 喜 {} 忌 {} 仇 {} ({})",
        s.level.name(),
        s.support_percent,
        s.favorable.name(),
        s.supportive.name(),
        s.unfavorable.name(),
        s.hostile.name(),
        s.logic.name()
    );
    for star in &chart.stars {
        println!("Star:    {} @ {}: {}", star.name, star.position, star.description);
    }
    let a = &chart.auxiliary;
    println!(
        "Palaces: 胎元 {}({})  命宫 {}({})  身宫 {}({})",
        a.conception.pillar,
        a.conception.nayin.name,
        a.life.pillar,
        a.life.nayin.name,
        a.body.pillar,
        a.body.nayin.name
    );
    println!();

    let f = &chart.fortune;
    println!(
        "Fortune: {} from {} ({}y {}m {}d after birth)",
        if f.forward { "forward" } else { "backward" },
        format_civil(&f.onset),
        f.offset.years,
        f.offset.months,
        f.offset.days
    );
    for p in &f.periods {
        let pillar = p.pillar.map_or_else(|| "小运".to_string(), |g| g.to_string());
        println!(
            "  {:>2}  {}  {}-{}  age {}-{}",
            p.index, pillar, p.start_year, p.end_year, p.start_age, p.end_age
        );
        for y in p.years.iter().filter(|y| y.is_expanded()) {
            println!("        {} {} (小运 {})", y.year, y.pillar, y.minor);
            for m in y.months.iter().flatten() {
                let first = m.days.first().map(|d| d.date.to_string()).unwrap_or_default();
                println!(
                    "          {:>2} {} {} from {} ({} days)",
                    m.index,
                    m.term.name(),
                    m.pillar,
                    first,
                    m.days.len()
                );
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn build_spec(
    config: &EngineConfig,
    datetime: String,
    calendar: &str,
    leap_month: bool,
    gender: &str,
    coordinates: Option<(f64, f64)>,
    location: Option<String>,
    modes: [Option<String>; 3],
    name: Option<String>,
) -> BirthSpecification {
    let [time_mode, month_mode, zi_mode] = modes;
    let mut spec = match calendar {
        "solar" => config.solar_spec(datetime),
        "lunisolar" | "lunar" => config.lunisolar_spec(datetime, leap_month),
        _ => exit_with(format!("Invalid calendar: {calendar} (solar or lunisolar)")),
    }
    .with_gender(parse_gender(gender));
    if let Some((lon, lat)) = coordinates {
        spec = spec.with_coordinates(lon, lat);
    } else if let Some(place) = location {
        spec = spec.with_place(place);
    }
    if let Some(n) = name {
        spec = spec.with_name(n);
    }
    let defaults = spec.config;
    spec.with_config(ChartConfig {
        time_mode: time_mode.as_deref().map_or(defaults.time_mode, parse_time_mode),
        month_mode: month_mode.as_deref().map_or(defaults.month_mode, parse_month_mode),
        hour_boundary_mode: zi_mode.as_deref().map_or(defaults.hour_boundary_mode, parse_zi_mode),
    })
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_ref());
    tracing::debug!(decade_count = config.decade_count, locations = config.locations.len(), "config ready");

    match cli.command {
        Commands::Arrange {
            datetime,
            calendar,
            leap_month,
            gender,
            longitude,
            latitude,
            location,
            time_mode,
            month_mode,
            zi_mode,
            expand,
            name,
            json,
        } => {
            let range = expand
                .as_deref()
                .map(|s| parse_year_range(s).unwrap_or_else(|e| exit_with(format!("Invalid range: {e}"))));
            let spec = build_spec(
                &config,
                datetime,
                &calendar,
                leap_month,
                &gender,
                longitude.zip(latitude),
                location,
                [time_mode, month_mode, zi_mode],
                name,
            );
            let engine = Engine::with_almanac(config);
            let chart = engine
                .arrange(&spec, range)
                .unwrap_or_else(|e| exit_with(format!("Failed to arrange chart: {e}")));
            if json {
                match chart.to_json() {
                    Ok(text) => println!("{text}"),
                    Err(e) => exit_with(format!("Failed to render JSON: {e}")),
                }
            } else {
                print_chart(&chart);
            }
        }

        Commands::Terms { year, json } => {
            let terms = Almanac::new()
                .year_terms(year)
                .unwrap_or_else(|e| exit_with(format!("Failed to compute terms: {e}")));
            if json {
                match serde_json::to_string_pretty(&terms) {
                    Ok(text) => println!("{text}"),
                    Err(e) => exit_with(format!("Failed to render JSON: {e}")),
                }
            } else {
                for t in &terms {
                    let kind = if t.term.is_sectional() { "节" } else { "气" };
                    println!("{} {}  {}", kind, t.term.name(), format_civil(&t.instant));
                }
            }
        }

        Commands::Lunar { datetime } => {
            let date = NaiveDate::parse_from_str(datetime.trim(), "%Y-%m-%d")
                .ok()
                .or_else(|| parse_civil(&datetime).ok().map(|t| t.date()))
                .unwrap_or_else(|| exit_with(format!("Invalid date: {datetime}")));
            let almanac = Almanac::new();
            let lunar = almanac
                .solar_to_lunar(date)
                .unwrap_or_else(|e| exit_with(format!("Failed to convert: {e}")));
            let month = almanac
                .lunar_month_pillar(lunar)
                .unwrap_or_else(|e| exit_with(format!("Failed to convert: {e}")));
            println!(
                "{date}  {lunar}  月 {}  日 {}",
                raw_name(&month),
                raw_name(&almanac.day_pillar(date))
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_ranges() {
        assert_eq!(parse_year_range("2024"), Ok(2024..=2024));
        assert_eq!(parse_year_range("2024..2026"), Ok(2024..=2026));
        assert_eq!(parse_year_range("2024..=2026"), Ok(2024..=2026));
        assert!(parse_year_range("abc").is_err());
    }

    #[test]
    fn cli_parses_arrange() {
        let cli = Cli::try_parse_from([
            "bazi",
            "arrange",
            "--datetime",
            "1990-01-01 12:00:00",
            "--longitude",
            "121.47",
            "--latitude",
            "31.23",
            "--expand",
            "2024..2025",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Arrange { longitude: Some(_), .. }));
    }

    #[test]
    fn spec_takes_config_defaults() {
        let mut config = EngineConfig::default();
        config.defaults.time_mode = TimeMode::MeanSolar;
        let spec = build_spec(
            &config,
            "1990-01-01 12:00:00".into(),
            "solar",
            false,
            "female",
            None,
            Some("上海".into()),
            [None, Some("lunar_month".into()), None],
            None,
        );
        assert_eq!(spec.gender, Gender::Female);
        assert_eq!(spec.config.time_mode, TimeMode::MeanSolar);
        assert_eq!(spec.config.month_mode, MonthMode::LunarMonth);
        assert_eq!(spec.place, bazi_engine::BirthPlace::Named("上海".into()));
    }
}
