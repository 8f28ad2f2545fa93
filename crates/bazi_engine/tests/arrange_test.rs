//! End-to-end arrangement scenarios through the built-in almanac.

use bazi_almanac::{Gender, HourBoundaryMode, LunarDate};
use bazi_base::{Element, StarKind, Stem, TenGod};
use bazi_engine::{
    BirthSpecification, ChartConfig, CompoundPattern, Engine, EngineConfig, EngineError,
    GejuCategory, GejuStatus, InteractionKind, LocationSource, Position, RoleLogic, Stage,
    StrengthLevel, TimeMode,
};
use bazi_time::parse_civil;

fn shanghai_1990() -> BirthSpecification {
    BirthSpecification::solar("1990-01-01 12:00:00")
        .with_name("测试")
        .with_coordinates(121.47, 31.23)
}

fn engine() -> Engine {
    Engine::default()
}

fn mean_solar() -> ChartConfig {
    ChartConfig {
        time_mode: TimeMode::MeanSolar,
        ..ChartConfig::default()
    }
}

#[test]
fn new_year_1990_in_shanghai() {
    let chart = engine().arrange(&shanghai_1990(), None).unwrap();

    assert_eq!(chart.correction.instant, parse_civil("1990-01-01 12:02:10").unwrap());
    assert_eq!(chart.pillars.year.ganzhi.stem, Stem::Ji);
    assert_eq!(chart.pillars.to_string(), "己巳 丙子 丙寅 甲午");
    assert_eq!(chart.lunar, LunarDate::new(1989, 12, false, 5));

    assert_eq!(chart.month_command.stem, Stem::Gui);
    assert_eq!(chart.month_command.day_in_span, 16);

    // 甲己 combine toward earth but 戊 is not rising in 子; 子午 clash.
    let combos: Vec<_> = chart
        .interactions
        .iter()
        .filter(|i| i.kind == InteractionKind::Combination)
        .collect();
    assert_eq!(combos.len(), 1);
    assert_eq!(combos[0].element, Some(Element::Earth));
    assert!(!combos[0].transformed);
    assert!(chart.interactions.iter().any(|i| {
        i.kind == InteractionKind::Clash && (i.source, i.target) == (Position::Month, Position::Hour)
    }));

    assert_eq!(chart.geju.name, "伤官佩印");
    assert_eq!(chart.geju.category, GejuCategory::OrdinaryEight);
    assert_eq!(chart.geju.compound, Some(CompoundPattern::ExpressionCarriesResource));
    // No stem shows the month's 癸, so the relabeled pattern stays provisional.
    assert_eq!(chart.geju.status, GejuStatus::Provisional);

    assert_eq!(chart.strength.level, StrengthLevel::Weak);
    assert_eq!(chart.strength.logic, RoleLogic::PatternProtection);
    assert_eq!(chart.strength.favorable, Element::Wood);

    let stars: Vec<_> = chart.stars.iter().map(|s| (s.kind, s.position)).collect();
    assert_eq!(
        stars,
        vec![(StarKind::HeavenVirtue, Position::Year), (StarKind::Romance, Position::Hour)]
    );

    assert_eq!(chart.auxiliary.conception.pillar.to_string(), "丁卯");
    assert_eq!(chart.auxiliary.life.pillar.to_string(), "乙亥");

    assert!(!chart.fortune.forward);
    assert_eq!(
        chart.fortune.periods[1].pillar.map(|g| g.to_string()),
        Some("乙亥".to_string())
    );

    assert_eq!(chart.trace.first().map(|s| s.stage), Some(Stage::Preprocess));
    assert_eq!(chart.trace.last().map(|s| s.stage), Some(Stage::Stars));
}

#[test]
fn daylight_saving_shifts_back_one_hour() {
    let spec = BirthSpecification::solar("1988-07-01 12:00:00")
        .with_coordinates(120.0, 30.0)
        .with_config(mean_solar());
    let chart = engine().arrange(&spec, None).unwrap();
    assert!(chart.correction.dst.applied());
    assert_eq!(chart.correction.instant, parse_civil("1988-07-01 11:00:00").unwrap());

    // 13:30 on the clock is 12:30 standard time: 午, not 未.
    let spec = BirthSpecification::solar("1988-07-01 13:30:00")
        .with_coordinates(120.0, 30.0)
        .with_config(mean_solar());
    let chart = engine().arrange(&spec, None).unwrap();
    assert_eq!(chart.pillars.hour.branch().to_string(), "午");
}

#[test]
fn arrange_is_idempotent() {
    let engine = engine();
    let a = engine.arrange(&shanghai_1990(), None).unwrap();
    let b = engine.arrange(&shanghai_1990(), None).unwrap();
    assert!(a.same_chart(&b));
    let describe = |c: &bazi_engine::ChartResult| {
        c.trace.iter().map(|s| s.description.clone()).collect::<Vec<_>>()
    };
    assert_eq!(describe(&a), describe(&b));
}

#[test]
fn lunisolar_leap_month_input() {
    let spec = BirthSpecification::lunisolar("2023-02-11 10:00:00", true);
    let chart = engine().arrange(&spec, None).unwrap();
    assert_eq!(chart.correction.civil, parse_civil("2023-04-01 10:00:00").unwrap());
    assert_eq!(chart.lunar, LunarDate::new(2023, 2, true, 11));
    assert_eq!(chart.correction.location.name.as_deref(), Some("北京"));

    let missing = BirthSpecification::lunisolar("2024-02-11 10:00:00", true);
    assert!(matches!(
        engine().arrange(&missing, None),
        Err(EngineError::Almanac(_))
    ));
}

#[test]
fn unknown_place_uses_reference_meridian() {
    let spec = BirthSpecification::solar("2000-06-01 08:00:00").with_place("亚特兰蒂斯");
    let chart = engine().arrange(&spec, None).unwrap();
    assert_eq!(chart.correction.location.source, LocationSource::Fallback);
    assert_eq!(chart.correction.location.longitude, 120.0);
    assert!(chart.trace.iter().any(|s| s.stage == Stage::Location));
}

#[test]
fn malformed_literal_is_rejected() {
    for literal in ["1990/01/01 12:00:00", "1990-01-01", "1990-13-01 12:00:00", ""] {
        let spec = BirthSpecification::solar(literal);
        assert_eq!(
            engine().arrange(&spec, None).unwrap_err(),
            EngineError::InvalidDateFormat {
                literal: literal.to_string()
            },
            "{literal:?}"
        );
    }
}

#[test]
fn late_zi_modes_change_the_day_pillar() {
    let base = BirthSpecification::solar("2000-01-01 23:30:00").with_coordinates(120.0, 30.0);
    let same = engine()
        .arrange(&base.clone().with_config(mean_solar()), None)
        .unwrap();
    let next = engine()
        .arrange(
            &base.with_config(ChartConfig {
                hour_boundary_mode: HourBoundaryMode::NextDayAt23,
                ..mean_solar()
            }),
            None,
        )
        .unwrap();
    assert_eq!(same.pillars.day.ganzhi.to_string(), "戊午");
    assert_eq!(next.pillars.day.ganzhi.to_string(), "己未");
    assert_eq!(same.pillars.hour.ganzhi, next.pillars.hour.ganzhi);
    // Roles follow the day stem of each chart.
    assert_eq!(same.pillars.hour.ten_god, Some(TenGod::SevenKillings));
    assert_eq!(next.pillars.hour.ten_god, Some(TenGod::DirectOfficer));
}

#[test]
fn expansion_on_request_and_afterwards() {
    let engine = engine();
    let eager = engine.arrange(&shanghai_1990(), Some(2024..=2025)).unwrap();
    let y2024 = eager.fortune.year(2024).unwrap();
    assert_eq!(y2024.months.as_ref().map(Vec::len), Some(12));
    assert!(!eager.fortune.year(2023).unwrap().is_expanded());

    let mut lazy = engine.arrange(&shanghai_1990(), None).unwrap();
    assert!(lazy.fortune.years().all(|y| !y.is_expanded()));
    assert_eq!(engine.expand(&mut lazy, 2024..=2025).unwrap(), 2);
    assert_eq!(lazy.fortune, eager.fortune);
    engine.expand(&mut lazy, 2024..=2025).unwrap();
    assert_eq!(lazy.fortune, eager.fortune);

    assert_eq!(
        engine.arrange(&shanghai_1990(), Some(2030..=2020)).unwrap_err(),
        EngineError::InvalidYearRange { from: 2030, to: 2020 }
    );
}

#[test]
fn female_cycle_runs_forward() {
    let spec = shanghai_1990().with_gender(Gender::Female);
    let chart = engine().arrange(&spec, None).unwrap();
    assert!(chart.fortune.forward);
    assert_eq!(
        chart.fortune.periods[1].pillar.map(|g| g.to_string()),
        Some("丁丑".to_string())
    );
}

#[test]
fn configured_locations_extend_the_gazetteer() {
    let config = EngineConfig::from_toml_str(
        r#"
        [[locations]]
        name = "苏州"
        longitude = 120.62
        latitude = 31.30
        "#,
    )
    .unwrap();
    let engine = Engine::with_almanac(config);
    let spec = BirthSpecification::solar("2000-06-01 08:00:00").with_place("苏州");
    let chart = engine.arrange(&spec, None).unwrap();
    assert_eq!(chart.correction.location.source, LocationSource::Gazetteer);
    assert_eq!(chart.correction.location.longitude, 120.62);
}

#[test]
fn chart_renders_as_json() {
    let chart = engine().arrange(&shanghai_1990(), None).unwrap();
    let json: serde_json::Value = serde_json::from_str(&chart.to_json().unwrap()).unwrap();
    assert_eq!(json["geju"]["name"], "伤官佩印");
    assert_eq!(json["request"]["datetime"], "1990-01-01 12:00:00");
    assert!(json["trace"].as_array().is_some_and(|t| !t.is_empty()));
}
