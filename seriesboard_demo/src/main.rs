// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a sample X-ray timing session to `seriesboard_demo.html`.
//!
//! Pass a config JSON path as the first argument to override the defaults. Set `RUST_LOG`
//! (default `info`) to see the dashboard's lifecycle logging.

mod html;
mod svg;

use std::error::Error;
use std::f64::consts::TAU;

use seriesboard_charts::{AxisType, HighlightRegion, PlotKind, PlotStyle, ThemeKind, Viewport};
use seriesboard_core::{AnalysisId, ChartId, SeriesId};
use seriesboard_dashboard::{
    ChartEditor, Dashboard, DashboardConfig, InMemoryPresets, InMemorySeries, JsonFileStore,
    LayoutStore, ParameterSetProvider, SeriesPayload, UiContext, fetch,
};
use seriesboard_transforms::{FilterMethod, FilterPreset, MatchType};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const ANALYSIS: &str = "demo-lightcurve";

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::load_from_file(&path)?,
        None => DashboardConfig::default(),
    };

    let mut dashboard = Dashboard::new(config, UiContext::default());
    let ticket = dashboard.open_dashboard(AnalysisId::from(ANALYSIS));
    let completion = pollster::block_on(fetch(&provider(), ticket));
    dashboard.complete_fetch(completion);
    if let Some(banner) = dashboard.banner() {
        warn!(message = %banner.message, "dashboard not ready");
    }

    let presets = InMemoryPresets::new(vec![
        FilterPreset::new("quiescent", "light_curve")
            .with_combination(FilterMethod::Remove, MatchType::Any)
            .with_condition("> 125")
            .public(),
        FilterPreset::new("qpo band", "power_spectrum").with_condition("> 1"),
    ]);
    let light_curve_presets = pollster::block_on(presets.presets("light_curve"))?;

    let light_curve = build_light_curve(&mut dashboard)?;
    let quiescent = build_quiescent(&mut dashboard, &light_curve_presets)?;
    let spectrum = build_power_spectrum(&mut dashboard)?;
    let distribution = build_distribution(&mut dashboard)?;
    let background = build_background(&mut dashboard)?;

    let viewport = dashboard.config().viewport();
    let hovered = viewport.with_hover((viewport.width * 0.62, viewport.height * 0.35));

    let mut sections = Vec::new();
    let mut push = |dashboard: &Dashboard, id: ChartId, viewport: Viewport, description: &str| {
        let Some(scene) = dashboard.render_chart(id, viewport) else {
            return;
        };
        if !scene.diagnostics.is_clean() {
            info!(chart = %id, diagnostics = ?scene.diagnostics, "rendered with workarounds");
        }
        let title = dashboard
            .chart(id)
            .map(|c| c.title.clone())
            .unwrap_or_default();
        sections.push(html::HtmlSection {
            title,
            description: description.to_string(),
            svg: svg::scene_to_svg(&scene),
        });
    };

    push(
        &dashboard,
        light_curve,
        hovered,
        "Source flux with 1-sigma error bars over the background rate, flare highlighted; the tooltip shows the point nearest the pointer.",
    );
    push(
        &dashboard,
        quiescent,
        viewport,
        "The same light curve with the public \"quiescent\" preset applied: points above 125 counts/s are removed.",
    );
    push(
        &dashboard,
        spectrum,
        viewport,
        "Power density spectrum on log-log axes, showing red noise and a QPO near 0.5 Hz.",
    );
    push(
        &dashboard,
        distribution,
        viewport,
        "Histogram of flux values across the observation.",
    );
    push(
        &dashboard,
        background,
        viewport,
        "Background rate per time bin, bars kept only where the rate exceeds 19 counts/s.",
    );

    dashboard.ui_mut().set_theme(ThemeKind::Dark);
    push(&dashboard, spectrum, viewport, "The power spectrum again with the dark theme.");

    let html = html::render_report("SeriesBoard demo", &sections);
    std::fs::write("seriesboard_demo.html", html)?;
    info!(charts = sections.len(), "wrote seriesboard_demo.html");

    let mut store = JsonFileStore::open("seriesboard_demo_layouts")?;
    let layout_id = store.save(&dashboard.layout())?;
    info!(layout = layout_id.0, "saved dashboard layout");
    Ok(())
}

/// Opens the editor on `chart`, applies `edit` to the draft and saves it.
fn edit_chart(
    dashboard: &mut Dashboard,
    chart: ChartId,
    edit: impl FnOnce(&mut ChartEditor),
) -> Result<(), Box<dyn Error>> {
    dashboard.open_editor(chart);
    if let Some(editor) = dashboard.editor_mut() {
        edit(editor);
    }
    dashboard.save_editor()?;
    Ok(())
}

fn build_light_curve(dashboard: &mut Dashboard) -> Result<ChartId, Box<dyn Error>> {
    let chart = dashboard.add_chart();
    edit_chart(dashboard, chart, |editor| {
        editor.set_title("Light curve");
        editor.set_axis_types(AxisType::Time, AxisType::Linear);
        editor.set_axis_titles("time", "counts / s");
        editor.add_plot(SeriesId::from("flux"));
        editor.set_plot_style(PlotStyle {
            line_width: 1.5,
            error_bars: true,
            ..PlotStyle::of_kind(PlotKind::Line)
        });
        editor.add_plot(SeriesId::from("background"));
        editor.set_plot_style(PlotStyle {
            marker_size: 4.0,
            ..PlotStyle::of_kind(PlotKind::Scatter)
        });
        editor.add_highlight(HighlightRegion::new(118.0, 146.0).with_label("flare"));
    })?;
    Ok(chart)
}

fn build_quiescent(
    dashboard: &mut Dashboard,
    presets: &[FilterPreset],
) -> Result<ChartId, Box<dyn Error>> {
    let chart = dashboard.add_chart();
    edit_chart(dashboard, chart, |editor| {
        editor.set_title("Quiescent flux");
        editor.set_axis_types(AxisType::Time, AxisType::Linear);
        editor.set_axis_titles("time", "counts / s");
        editor.set_legend_visible(false);
    })?;
    if let Some(plot) = dashboard.add_plot_to_chart(chart, SeriesId::from("flux")) {
        for preset in presets {
            dashboard.apply_preset(chart, plot, preset);
        }
    }
    edit_chart(dashboard, chart, |editor| {
        editor.set_plot_style(PlotStyle::of_kind(PlotKind::Area));
    })?;
    Ok(chart)
}

fn build_power_spectrum(dashboard: &mut Dashboard) -> Result<ChartId, Box<dyn Error>> {
    let chart = dashboard.add_chart();
    edit_chart(dashboard, chart, |editor| {
        editor.set_title("Power spectrum");
        editor.set_axis_types(AxisType::Log, AxisType::Log);
        editor.set_axis_titles("frequency (Hz)", "power");
        editor.set_grid(true, true);
        editor.add_plot(SeriesId::from("pds"));
        editor.set_plot_style(PlotStyle {
            marker_size: 4.0,
            error_bars: true,
            ..PlotStyle::of_kind(PlotKind::Scatter)
        });
        editor.set_property("normalization", "leahy");
    })?;
    Ok(chart)
}

fn build_distribution(dashboard: &mut Dashboard) -> Result<ChartId, Box<dyn Error>> {
    let chart = dashboard.add_chart();
    edit_chart(dashboard, chart, |editor| {
        editor.set_title("Flux distribution");
        editor.set_axis_titles("counts / s", "bins");
        editor.set_tooltips_visible(false);
        editor.add_plot(SeriesId::from("flux"));
        editor.set_plot_style(PlotStyle {
            bins: 20,
            ..PlotStyle::of_kind(PlotKind::Histogram)
        });
    })?;
    Ok(chart)
}

fn build_background(dashboard: &mut Dashboard) -> Result<ChartId, Box<dyn Error>> {
    let chart = dashboard.add_chart();
    edit_chart(dashboard, chart, |editor| {
        editor.set_title("Background");
        editor.set_axis_types(AxisType::Time, AxisType::Linear);
        editor.add_plot(SeriesId::from("background"));
        editor.set_plot_style(PlotStyle::of_kind(PlotKind::Bar));
        editor.add_condition("> 19");
    })?;
    Ok(chart)
}

/// Deterministic noise in `-0.5..0.5`.
fn jitter(i: usize) -> f64 {
    let x = (i as f64 * 12.9898).sin() * 43_758.545_3;
    x - x.floor() - 0.5
}

fn provider() -> InMemorySeries {
    let flux: Vec<(f64, f64)> = (0..200)
        .map(|i| {
            let t = i as f64;
            let flare = if t >= 120.0 { 60.0 * (-(t - 120.0) / 6.0).exp() } else { 0.0 };
            (t, 100.0 + 10.0 * (TAU * t / 50.0).sin() + flare + 6.0 * jitter(i))
        })
        .collect();
    let flux_errors = flux.iter().map(|(_, v)| v.sqrt() / 3.0).collect();

    let background: Vec<(f64, f64)> = (0..100)
        .map(|i| (2.0 * i as f64, 20.0 + 2.0 * jitter(i + 1000)))
        .collect();

    let pds: Vec<(f64, f64)> = (0..120)
        .map(|k| {
            let f = 0.01 * 1.05_f64.powi(k);
            let qpo = 40.0 / (1.0 + ((f - 0.5) / 0.05).powi(2));
            let power = 50.0 * f.powf(-1.5) + qpo + 2.0;
            (f, power * (1.0 + 0.3 * jitter(k as usize + 2000)))
        })
        .collect();
    let pds_errors = pds.iter().map(|(_, p)| 0.2 * p).collect();

    InMemorySeries::new().with_series(
        ANALYSIS,
        vec![
            SeriesPayload::new("flux", flux)
                .with_label("source")
                .with_color("#1f77b4")
                .with_errors(flux_errors),
            SeriesPayload::new("background", background)
                .with_label("background")
                .with_color("#ff7f0e"),
            SeriesPayload::new("pds", pds)
                .with_label("PDS")
                .with_errors(pds_errors),
        ],
    )
}
