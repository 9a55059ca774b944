use std::time::Duration;

use glam::{vec3, Vec3};
use penstroke::tools::{clear_all_engines, Eraser, Pen, PixelEraser};
use penstroke::{EngineConfig, Palette, SplitPolicy, StrokeEngine};

#[derive(thiserror::Error, Debug)]
#[error("no global tracing subscriber set")]
struct NoTracingSubscriber;

fn configure_tracing() -> anyhow::Result<()> {
	let result = Err(NoTracingSubscriber);

	let result = result.or_else(|_| {
		let max_level = if cfg!(debug_assertions) {
			tracing::Level::TRACE
		} else {
			tracing::Level::INFO
		};
		tracing::subscriber::set_global_default(
			tracing_subscriber::FmtSubscriber::builder()
				.with_max_level(max_level)
				.finish(),
		)
	});

	Ok(result?)
}

fn configure_logging() -> anyhow::Result<()> {
	configure_tracing()?;

	// Redirect `log` to `tracing`. With the "log" feature on `tracing`, failing to set the global subscriber above sends `tracing` events to `log` instead.
	#[cfg(feature = "log")]
	tracing_log::LogTracer::init()?;

	Ok(())
}

/// A gentle arc from `from` to `to`, sampled at `steps` points.
fn arc(from: Vec3, to: Vec3, steps: usize) -> impl Iterator<Item = Vec3> {
	(0..=steps).map(move |i| {
		let t = i as f32 / steps as f32;
		from.lerp(to, t) + Vec3::Y * (t * std::f32::consts::PI).sin() * 0.2
	})
}

fn draw(pen: &Pen, engine: &mut StrokeEngine, points: impl IntoIterator<Item = Vec3>) {
	let mut points = points.into_iter();
	pen.use_down(engine, points.next());
	for tip in points {
		pen.update(engine, tip);
	}
	if let Some(index) = pen.use_up(engine) {
		tracing::info!(index, color = %engine.color(), "stroke committed");
	}
}

fn report(engines: &[StrokeEngine]) {
	for (surface, engine) in engines.iter().enumerate() {
		let batches = engine
			.batches()
			.iter()
			.filter(|(_, batch)| !batch.is_empty())
			.map(|(color, batch)| format!("{color}: {} points", batch.len()))
			.collect::<Vec<_>>();
		tracing::info!(surface, strokes = engine.store().len(), ?batches, "surface state");
	}
}

fn main() -> anyhow::Result<()> {
	if let Err(error) = configure_logging() {
		// We can technically continue without logging.
		tracing::error!(error = error.to_string());
	}

	let css = ["white", "#e63946", "rgb(42, 157, 143)", "hsl(210, 80%, 50%)"];
	let mut engines = vec![
		StrokeEngine::new(EngineConfig::from_css_palette(css)?),
		StrokeEngine::new(
			EngineConfig::builder()
				.palette(Palette::parse(css)?)
				.split_policy(SplitPolicy::Truncate)
				.build()?,
		),
	];
	engines[0].set_color_listener(|color, rgba| tracing::info!(%color, ?rgba, "pen color"));

	let pen = Pen::default();
	for (i, y) in [0.0, 0.5, 1.0].into_iter().enumerate() {
		let engine = &mut engines[i % 2];
		pen.cycle_color(engine);
		draw(&pen, engine, arc(vec3(-1.0, y, 0.0), vec3(1.0, y, 0.0), 40));
	}
	pen.select_color(&mut engines[1], 7);
	draw(&pen, &mut engines[1], arc(vec3(0.0, -1.0, 0.0), vec3(0.0, 1.5, 0.5), 30));
	report(&engines);

	let mut eraser = Eraser::default();
	eraser.pick_up();
	let hover = vec3(-0.5, 0.6, 0.0);
	for frame in 0..4u64 {
		eraser.update(&mut engines, hover, Duration::from_millis(frame * 200));
	}
	for (surface, engine) in engines.iter().enumerate() {
		tracing::info!(surface, highlighted = engine.highlight().points().len(), "eraser hover");
	}
	let changed = eraser.use_down(&mut engines, hover);
	eraser.put_down(&mut engines);
	tracing::info!(changed, "whole-stroke erase");
	report(&engines);

	let mut pixel_eraser = PixelEraser::builder().enabled(true).radius(0.05).build();
	pixel_eraser.start_erasing();
	for x in (0..=20).map(|i| -1.0 + i as f32 * 0.1) {
		let swipe = vec3(x, 0.2, 0.0);
		let cut = pixel_eraser.update(&mut engines, swipe);
		if cut.changed() {
			tracing::info!(x, ?cut, "pixel erase");
		}
	}
	pixel_eraser.put_down(&mut engines);
	tracing::info!(
		trail_bytes = engines[0].eraser_uniforms().trail_bytes().len(),
		"eraser uniforms ready"
	);
	report(&engines);

	clear_all_engines(&mut engines);
	report(&engines);
	Ok(())
}
