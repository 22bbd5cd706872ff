// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of a dashboard session.

use seriesboard_charts::{Chart, MAX_BINS, ModelError, PlotKind, PlotStyle, Renderer, Viewport};
use seriesboard_core::{AnalysisId, ChartId, DataPoint, Rgba, Series, SeriesId};
use seriesboard_dashboard::{
    Dashboard, DashboardConfig, EditorState, FetchError, InMemoryPresets, InMemorySeries,
    JobStatus, LayoutStore, LoadState, MemoryStore, ParameterSetProvider, SeriesPayload,
    UiContext, fetch,
};
use seriesboard_transforms::{
    EmptyConditions, FilterConfig, FilterMethod, FilterPreset, FilterSpec, MatchType, evaluate,
};

fn provider() -> InMemorySeries {
    InMemorySeries::new()
        .with_series(
            "lc-1",
            vec![
                SeriesPayload::new("flux", [(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)])
                    .with_label("Flux")
                    .with_errors(vec![0.1, 0.1, 0.2, 0.2]),
                SeriesPayload::new("background", [(0.0, 0.5), (1.0, 0.5), (2.0, 0.6)]),
                SeriesPayload::new("gap", [(f64::NAN, 1.0)]),
            ],
        )
        .with_error("queued", FetchError::NotReady(JobStatus::Pending))
        .with_error("broken", FetchError::JobFailed(String::from("solver diverged")))
}

fn open(dashboard: &mut Dashboard, analysis: &str) {
    let ticket = dashboard.open_dashboard(AnalysisId::from(analysis));
    let completion = pollster::block_on(fetch(&provider(), ticket));
    assert!(dashboard.complete_fetch(completion), "fresh fetch applies");
}

fn ready() -> Dashboard {
    let mut dashboard = Dashboard::default();
    open(&mut dashboard, "lc-1");
    dashboard
}

#[test]
fn rendering_never_panics_on_missing_or_empty_data() {
    let mut dashboard = ready();
    let empty = dashboard.add_chart();
    let broken = dashboard.add_chart();
    dashboard.add_plot_to_chart(broken, SeriesId::from("gap"));
    dashboard.add_plot_to_chart(broken, SeriesId::from("does-not-exist"));

    let kinds = [
        PlotKind::Line,
        PlotKind::Area,
        PlotKind::Scatter,
        PlotKind::Bar,
        PlotKind::Histogram,
    ];
    for viewport in [
        Viewport::new(640.0, 360.0),
        Viewport::new(0.0, 0.0),
        Viewport::new(f64::NAN, -5.0),
        Viewport::new(200.0, 100.0).with_hover((100.0, 50.0)),
    ] {
        let scene = dashboard.render_chart(empty, viewport).unwrap();
        assert_eq!(scene.texts().filter(|t| t.starts_with("no data")).count(), 1);

        for kind in kinds {
            dashboard.open_editor(broken);
            let editor = dashboard.editor_mut().unwrap();
            editor.set_plot_style(PlotStyle {
                kind,
                ..PlotStyle::default()
            });
            dashboard.save_editor().unwrap();
            let scene = dashboard.render_chart(broken, viewport).unwrap();
            assert_eq!(scene.diagnostics.missing_series, 1);
            assert_eq!(scene.diagnostics.empty_plots, 1);
        }
    }
}

#[test]
fn add_then_remove_plot_is_equivalent_except_id_high_water() {
    let mut dashboard = ready();
    let chart = dashboard.add_chart();
    dashboard.add_plot_to_chart(chart, SeriesId::from("flux"));
    let before = dashboard.chart(chart).unwrap().clone();

    let plot = dashboard.add_plot_to_chart(chart, SeriesId::from("background")).unwrap();
    assert!(dashboard.remove_plot(chart, plot));

    let mut after = dashboard.chart(chart).unwrap().clone();
    assert!(after.plot_id_high_water.last() > before.plot_id_high_water.last());
    after.plot_id_high_water = before.plot_id_high_water;
    assert_eq!(after, before);
}

#[test]
fn empty_condition_lists_follow_the_configured_convention() {
    let series = Series::new("s", "S", Rgba::rgb(0, 0, 0), vec![
        DataPoint::new(0.0, 1.0),
        DataPoint::new(1.0, 2.0),
    ]);
    let lookup = vec![series.clone()];
    let config = FilterConfig::default();
    assert_eq!(config.empty_conditions, EmptyConditions::Vacuous);

    let all = FilterSpec::new().with_match_type(MatchType::All);
    assert_eq!(evaluate(&series, &all, &lookup, &config).included, vec![0, 1]);

    let any = FilterSpec::new().with_match_type(MatchType::Any);
    assert!(evaluate(&series, &any, &lookup, &config).included.is_empty());
}

#[test]
fn greater_than_three_keeps_the_last_two_points() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    let points = values.iter().enumerate().map(|(i, v)| DataPoint::new(i as f64, *v));
    let series = Series::new("s", "S", Rgba::rgb(0, 0, 0), points.collect());
    let filter = FilterSpec::new()
        .with_method(FilterMethod::Keep)
        .with_match_type(MatchType::All)
        .with_condition("> 3");
    let outcome = evaluate(&series, &filter, &[] as &[Series], &FilterConfig::default());
    assert_eq!(outcome.included, vec![3, 4]);
    assert_eq!(outcome.excluded, vec![0, 1, 2]);
}

#[test]
fn chart_ids_are_never_reused() {
    let mut dashboard = ready();
    let ids: Vec<ChartId> = (0..3).map(|_| dashboard.add_chart()).collect();
    assert_eq!(ids, [ChartId(1), ChartId(2), ChartId(3)]);
    assert!(dashboard.delete_chart(ChartId(2)));
    assert_eq!(dashboard.add_chart(), ChartId(4));
    assert!(dashboard.delete_chart(ChartId(4)));
    assert_eq!(dashboard.add_chart(), ChartId(5));
}

#[test]
fn cancel_leaves_the_chart_untouched_and_save_commits_the_draft() {
    let mut dashboard = ready();
    let chart = dashboard.add_chart();
    dashboard.add_plot_to_chart(chart, SeriesId::from("flux"));
    let committed = dashboard.chart(chart).unwrap().clone();

    dashboard.open_editor(chart);
    let editor = dashboard.editor_mut().unwrap();
    editor.add_condition("> 2");
    editor.set_method(FilterMethod::Remove);
    editor.set_source(SeriesId::from("background"));
    assert_eq!(dashboard.chart(chart), Some(&committed));
    dashboard.cancel_editor();
    assert_eq!(dashboard.editor_state(), EditorState::Closed);
    assert_eq!(dashboard.chart(chart), Some(&committed));
    assert_eq!(
        serde_json::to_vec(dashboard.chart(chart).unwrap()).unwrap(),
        serde_json::to_vec(&committed).unwrap()
    );

    dashboard.open_editor(chart);
    let editor = dashboard.editor_mut().unwrap();
    editor.set_title("Flux over time");
    editor.add_condition("< 4");
    let draft: Chart = editor.draft().clone();
    assert_eq!(dashboard.save_editor(), Ok(Some(chart)));
    assert_eq!(dashboard.chart(chart), Some(&draft));
    assert_eq!(dashboard.editor_state(), EditorState::Closed);
}

#[test]
fn oversized_histogram_bin_counts_are_rejected_and_never_allocated() {
    let mut dashboard = ready();
    let chart = dashboard.add_chart();
    dashboard.add_plot_to_chart(chart, SeriesId::from("flux"));
    dashboard.open_editor(chart);
    dashboard.editor_mut().unwrap().set_plot_style(PlotStyle {
        bins: u32::MAX,
        ..PlotStyle::of_kind(PlotKind::Histogram)
    });
    assert!(matches!(dashboard.save_editor(), Err(ModelError::InvalidStyle { .. })));
    assert_eq!(dashboard.editor_state(), EditorState::Editing(chart));

    // Rendering an unvalidated record clamps the bin count instead of allocating it.
    let draft = dashboard.editor().unwrap().draft().clone();
    let scene =
        Renderer::default().render(&draft, dashboard.registry(), Viewport::new(320.0, 200.0));
    assert!(scene.marks.len() <= MAX_BINS as usize + 64, "bin marks are capped");
}

#[test]
fn opening_another_chart_replaces_the_editor() {
    let mut dashboard = ready();
    let a = dashboard.add_chart();
    let b = dashboard.add_chart();
    dashboard.open_editor(a);
    dashboard.editor_mut().unwrap().set_title("unsaved");
    assert!(dashboard.open_editor(b));
    assert_eq!(dashboard.editor_state(), EditorState::Editing(b));
    let editor = dashboard.editor().unwrap();
    assert_eq!(editor.chart_id(), b);
    assert_eq!(editor.draft().title, "Chart 2");
    assert_eq!(dashboard.save_editor(), Ok(Some(b)));
    assert_eq!(dashboard.chart(a).unwrap().title, "Chart 1");

    dashboard.open_editor(a);
    assert!(dashboard.delete_chart(a));
    assert_eq!(dashboard.editor_state(), EditorState::Closed);
}

#[test]
fn payloads_are_validated_at_the_boundary() {
    let dashboard = ready();
    assert_eq!(dashboard.load_state(), &LoadState::Ready);
    let registry = dashboard.registry();
    assert_eq!(registry.len(), 3);
    let flux = registry.get_series(&SeriesId::from("flux")).unwrap();
    assert_eq!(flux.label, "Flux");
    assert_eq!(flux.errors.as_deref().map(<[f64]>::len), Some(4));
    assert!(registry.get_series(&SeriesId::from("gap")).unwrap().points.is_empty());
    assert!(registry.get_series(&SeriesId::from("nope")).is_err());
}

#[test]
fn failed_refresh_keeps_the_previous_series_and_raises_a_banner() {
    let mut dashboard = ready();
    let chart = dashboard.add_chart();
    dashboard.add_plot_to_chart(chart, SeriesId::from("flux"));

    let ticket = dashboard.open_dashboard(AnalysisId::from("lc-1"));
    let failure = InMemorySeries::new()
        .with_error("lc-1", FetchError::Network(String::from("connection reset")));
    assert!(dashboard.complete_fetch(pollster::block_on(fetch(&failure, ticket))));

    assert!(matches!(dashboard.load_state(), LoadState::Failed(FetchError::Network(_))));
    assert!(dashboard.banner().unwrap().message.contains("connection reset"));
    assert_eq!(dashboard.registry().len(), 3);
    let scene = dashboard.render_chart(chart, Viewport::new(300.0, 200.0)).unwrap();
    assert_eq!(scene.diagnostics.missing_series, 0);
}

#[test]
fn job_states_are_distinguished() {
    let mut dashboard = Dashboard::default();
    open(&mut dashboard, "queued");
    assert_eq!(dashboard.load_state(), &LoadState::JobPending(JobStatus::Pending));
    open(&mut dashboard, "broken");
    assert!(matches!(dashboard.load_state(), LoadState::Failed(FetchError::JobFailed(_))));
    open(&mut dashboard, "unknown");
    assert_eq!(dashboard.load_state(), &LoadState::NotFound);
}

#[test]
fn a_slow_fetch_for_an_abandoned_analysis_is_ignored() {
    let mut dashboard = Dashboard::default();
    let slow = dashboard.open_dashboard(AnalysisId::from("lc-1"));
    let fast = dashboard.open_dashboard(AnalysisId::from("queued"));

    assert!(dashboard.complete_fetch(pollster::block_on(fetch(&provider(), fast))));
    assert!(!dashboard.complete_fetch(pollster::block_on(fetch(&provider(), slow))));
    assert_eq!(dashboard.analysis_id(), Some(&AnalysisId::from("queued")));
    assert!(dashboard.registry().is_empty());
}

#[test]
fn presets_from_the_parameter_store_apply_like_manual_conditions() {
    let presets = InMemoryPresets::new(vec![
        FilterPreset::new("flares", "light_curve")
            .with_combination(FilterMethod::Remove, MatchType::Any)
            .with_condition("> 3.5")
            .public(),
        FilterPreset::new("peaks", "power_spectrum").with_condition("> 10"),
    ]);
    let found = pollster::block_on(presets.presets("light_curve")).unwrap();
    assert_eq!(found.len(), 1);

    let mut dashboard = ready();
    let chart = dashboard.add_chart();
    let plot = dashboard.add_plot_to_chart(chart, SeriesId::from("flux")).unwrap();
    assert!(dashboard.apply_preset(chart, plot, &found[0]));

    let mut manual = Chart::new(chart).add_plot(SeriesId::from("flux"));
    manual = manual.add_condition(plot, "> 3.5").0;
    let (filter_a, filter_b) = (
        &dashboard.chart(chart).unwrap().plots[0].filter,
        &manual.plots[0].filter,
    );
    assert_eq!(filter_a.method, FilterMethod::Remove);
    assert_eq!(filter_a.conditions, filter_b.conditions);

    let scene = dashboard.render_chart(chart, Viewport::new(300.0, 200.0)).unwrap();
    assert!(scene.diagnostics.is_clean());
}

#[test]
fn layouts_round_trip_through_a_store() {
    let config = DashboardConfig {
        filter: FilterConfig {
            empty_conditions: EmptyConditions::IncludeAll,
        },
        ..DashboardConfig::default()
    };
    let mut dashboard = Dashboard::new(config, UiContext::default());
    open(&mut dashboard, "lc-1");
    let chart = dashboard.add_chart();
    dashboard.add_plot_to_chart(chart, SeriesId::from("flux"));
    dashboard.add_chart();

    let mut store = MemoryStore::new();
    let saved = store.save(&dashboard.layout()).unwrap();

    let mut restored = Dashboard::new(config, UiContext::default());
    open(&mut restored, "lc-1");
    restored.restore_layout(store.load(saved).unwrap()).unwrap();
    assert_eq!(restored.charts(), dashboard.charts());
    assert_eq!(restored.add_chart(), ChartId(3));

    let renderer: Renderer = restored.renderer();
    let scene = renderer.render(&restored.charts()[0], restored.registry(), config.viewport());
    assert!(scene.diagnostics.is_clean());
}

#[test]
fn navigating_away_resets_the_session() {
    let mut dashboard = ready();
    let chart = dashboard.add_chart();
    dashboard.open_editor(chart);
    dashboard.navigate_away();
    assert_eq!(dashboard.load_state(), &LoadState::Idle);
    assert!(dashboard.charts().is_empty());
    assert_eq!(dashboard.editor_state(), EditorState::Closed);
    assert_eq!(dashboard.analysis_id(), None);
}
