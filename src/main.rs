use anyhow::Context;
use clap::Parser;
use eframe::egui;
use log::info;

use doseline::cli::Args;
use doseline::config::ChartStyle;
use doseline::journal::{self, Experience};
use doseline::reference::SubstanceIndex;
use doseline::timeline::build_chart_model;
use doseline::widgets::{ChartConfig, render_chart};

/// Main application state: inputs stay fixed, the chart model is pure
/// and rebuilt per frame from the current zoom and normalization mode.
struct DoselineApp {
    reference: SubstanceIndex,
    experience: Experience,
    pixels_per_hour: f64,
    independent_heights: bool,
    style: ChartStyle,
    chart_config: ChartConfig,
}

impl eframe::App for DoselineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.experience.title);
                ui.separator();
                ui.add(
                    egui::Slider::new(&mut self.pixels_per_hour, 10.0..=600.0)
                        .logarithmic(true)
                        .text("px/hour"),
                );
                ui.checkbox(&mut self.independent_heights, "independent heights");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let chart = build_chart_model(
                &self.experience.ingestions,
                &self.reference,
                self.pixels_per_hour / 3600.0,
                self.independent_heights,
                &self.style,
            );
            render_chart(ui, &chart, &self.style, &self.chart_config);
        });
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new().filter_level(args.log_level()).init();

    let reference = SubstanceIndex::from_path(&args.substances)
        .with_context(|| format!("loading substances from {}", args.substances.display()))?;
    let experiences = journal::load_experiences(&args.journal)
        .with_context(|| format!("loading journal from {}", args.journal.display()))?;
    let experience = experiences.get(args.experience).cloned().with_context(|| {
        format!(
            "experience index {} out of range ({} in journal)",
            args.experience,
            experiences.len()
        )
    })?;

    info!(
        "Charting '{}': {} ingestions, {} reference substances",
        experience.title,
        experience.ingestions.len(),
        reference.len()
    );

    let app = DoselineApp {
        reference,
        experience,
        pixels_per_hour: args.pixels_per_hour,
        independent_heights: args.independent_heights,
        style: ChartStyle::default(),
        chart_config: ChartConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 380.0])
            .with_title("doseline"),
        ..Default::default()
    };
    eframe::run_native("doseline", options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
