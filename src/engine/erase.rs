use glam::Vec3;
use itertools::Itertools;

use super::{Stroke, StrokeStore};
use crate::config::SplitPolicy;
use crate::geom::Sphere;
use crate::palette::ColorIndex;

/// What a partial erase did to the store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PixelEraseReport {
	/// Strokes that lost at least one segment.
	pub cut: usize,
	/// Strokes that no longer exist because fewer than two points survived.
	pub removed: usize,
	/// Extra strokes created by splitting.
	pub added: usize,
}

impl PixelEraseReport {
	pub fn changed(&self) -> bool {
		self.cut > 0
	}
}

impl std::ops::AddAssign for PixelEraseReport {
	fn add_assign(&mut self, other: Self) {
		self.cut += other.cut;
		self.removed += other.removed;
		self.added += other.added;
	}
}

/// Removes the first stroke, in store order, touched by `sphere`.
pub fn erase_at(store: &mut StrokeStore, sphere: &Sphere) -> Option<Stroke> {
	let index = store.first_intersecting(sphere)?;
	store.remove(index)
}

/// Clears the whole store if `sphere` touches any stroke.
pub fn clear_if_touching(store: &mut StrokeStore, sphere: &Sphere) -> bool {
	if store.first_intersecting(sphere).is_none() {
		return false;
	}
	store.clear_all();
	true
}

/// Cuts every segment touched by `sphere` out of the strokes whose color passes `color_filter`.
pub fn pixel_erase(
	store: &mut StrokeStore,
	sphere: &Sphere,
	policy: SplitPolicy,
	color_filter: impl Fn(ColorIndex) -> bool,
) -> PixelEraseReport {
	let mut report = PixelEraseReport::default();
	// Walk backwards so splicing never shifts a stroke that is still to be visited.
	for index in (0..store.len()).rev() {
		let Some(stroke) = store.get(index) else {
			continue;
		};
		if !color_filter(stroke.color()) || !sphere.intersects_box(&stroke.bounds()) {
			continue;
		}
		let Some(runs) = surviving_runs(stroke.points(), sphere, policy) else {
			continue;
		};
		report.cut += 1;
		match store.splice_runs(index, runs) {
			0 => report.removed += 1,
			n => report.added += n - 1,
		}
	}
	if report.changed() {
		tracing::debug!(?report, ?policy, "pixel erase");
	}
	report
}

/// The point runs left after removing every segment of `points` that touches `sphere`, or `None`
/// when nothing touches. Runs may hold fewer than two points; the store discards those.
pub fn surviving_runs(
	points: &[Vec3],
	sphere: &Sphere,
	policy: SplitPolicy,
) -> Option<Vec<Vec<Vec3>>> {
	let (&first, _) = points.split_first()?;
	let hits = points
		.iter()
		.tuple_windows()
		.map(|(&a, &b)| sphere.intersects_segment(a, b))
		.collect_vec();
	if !hits.contains(&true) {
		return None;
	}
	let ends = points[1..].iter().copied().zip(hits);
	Some(match policy {
		SplitPolicy::Split => split_runs(first, ends),
		SplitPolicy::Truncate => vec![truncated_run(first, ends)],
	})
}

fn split_runs(first: Vec3, ends: impl Iterator<Item = (Vec3, bool)>) -> Vec<Vec<Vec3>> {
	let mut runs = Vec::new();
	let mut run = vec![first];
	for (end, hit) in ends {
		if hit {
			runs.push(std::mem::replace(&mut run, vec![end]));
		} else {
			run.push(end);
		}
	}
	runs.push(run);
	runs.retain(|run| run.len() >= 2);
	runs
}

fn truncated_run(first: Vec3, ends: impl Iterator<Item = (Vec3, bool)>) -> Vec<Vec3> {
	let mut run = vec![first];
	let mut removing = false;
	for (end, hit) in ends {
		if hit {
			removing = !removing;
		} else if !removing {
			run.push(end);
		}
	}
	run
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::geom::AABox;
	use glam::vec3;

	/// Five points along x at 0, 1, 2, 3, 4.
	fn straight() -> Vec<Vec3> {
		(0..5).map(|i| vec3(i as f32, 0.0, 0.0)).collect()
	}

	/// Touches only the segment between points 2 and 3.
	fn middle_eraser() -> Sphere {
		Sphere::new(vec3(2.5, 0.2, 0.0), 0.3)
	}

	fn all(_: ColorIndex) -> bool {
		true
	}

	#[test]
	fn untouched_points_yield_none() {
		let sphere = Sphere::new(vec3(2.5, 5.0, 0.0), 0.3);
		assert!(surviving_runs(&straight(), &sphere, SplitPolicy::Split).is_none());
		assert!(surviving_runs(&[], &sphere, SplitPolicy::Split).is_none());
	}

	#[test]
	fn split_keeps_both_sides() {
		let p = straight();
		let runs = surviving_runs(&p, &middle_eraser(), SplitPolicy::Split).unwrap();
		assert_eq!(runs, vec![p[0..3].to_vec(), p[3..5].to_vec()]);
	}

	#[test]
	fn truncate_keeps_leading_run() {
		let p = straight();
		let runs = surviving_runs(&p, &middle_eraser(), SplitPolicy::Truncate).unwrap();
		assert_eq!(runs, vec![p[0..3].to_vec()]);
	}

	#[test]
	fn truncate_toggles_on_each_hit() {
		let p = straight();
		let sphere = Sphere::new(vec3(1.5, 0.0, 0.0), 0.6);
		let hits = p
			.iter()
			.tuple_windows()
			.map(|(&a, &b)| sphere.intersects_segment(a, b))
			.collect_vec();
		assert_eq!(hits, [true, true, true, false]);
		let runs = surviving_runs(&p, &sphere, SplitPolicy::Truncate).unwrap();
		// 0-1 on, 1-2 off, 2-3 on, 3-4 skipped while removing.
		assert_eq!(runs, vec![vec![p[0]]]);
	}

	#[test]
	fn split_drops_lone_points() {
		let p = straight();
		let sphere = Sphere::new(vec3(0.5, 0.0, 0.0), 0.2);
		let runs = surviving_runs(&p, &sphere, SplitPolicy::Split).unwrap();
		assert_eq!(runs, vec![p[1..5].to_vec()]);
		let sphere = Sphere::new(vec3(2.0, 0.0, 0.0), 10.0);
		let runs = surviving_runs(&p, &sphere, SplitPolicy::Split).unwrap();
		assert!(runs.is_empty());
	}

	#[test]
	fn erase_at_removes_first_touched_only() {
		let mut store = StrokeStore::new();
		store.commit(vec![vec3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)], ColorIndex(0));
		store.commit(vec![vec3(0.1, 0.0, 0.0), vec3(0.1, 1.0, 0.0)], ColorIndex(1));
		let sphere = Sphere::new(vec3(0.05, 0.5, 0.0), 0.2);
		let removed = erase_at(&mut store, &sphere).unwrap();
		assert_eq!(removed.color(), ColorIndex(0));
		assert_eq!(store.len(), 1);
		assert_eq!(store.color_of(0), Some(ColorIndex(1)));
	}

	#[test]
	fn erase_misses_leave_store_untouched() {
		let mut store = StrokeStore::new();
		store.commit(straight(), ColorIndex(0));
		let before = store.clone();
		let sphere = Sphere::new(vec3(0.0, 50.0, 0.0), 1.0);
		assert!(erase_at(&mut store, &sphere).is_none());
		assert!(!clear_if_touching(&mut store, &sphere));
		let report = pixel_erase(&mut store, &sphere, SplitPolicy::Split, all);
		assert_eq!(report, PixelEraseReport::default());
		assert_eq!(store, before);
	}

	#[test]
	fn clear_if_touching_wipes_everything() {
		let mut store = StrokeStore::new();
		for i in 0..5 {
			let x = i as f32 * 10.0;
			store.commit(vec![vec3(x, 0.0, 0.0), vec3(x + 1.0, 0.0, 0.0)], ColorIndex(i % 2));
		}
		let sphere = Sphere::new(vec3(40.5, 0.0, 0.0), 0.1);
		assert!(clear_if_touching(&mut store, &sphere));
		assert!(store.is_empty());
	}

	#[test]
	fn pixel_erase_splits_in_place() {
		let mut store = StrokeStore::new();
		store.commit(vec![vec3(0.0, 5.0, 0.0), vec3(1.0, 5.0, 0.0)], ColorIndex(1));
		store.commit(straight(), ColorIndex(0));
		store.commit(vec![vec3(0.0, -5.0, 0.0), vec3(1.0, -5.0, 0.0)], ColorIndex(2));
		let report = pixel_erase(&mut store, &middle_eraser(), SplitPolicy::Split, all);
		assert_eq!(
			report,
			PixelEraseReport {
				cut: 1,
				removed: 0,
				added: 1
			}
		);
		let p = straight();
		assert_eq!(store.len(), 4);
		assert_eq!(store.points_of(1), Some(&p[0..3]));
		assert_eq!(store.points_of(2), Some(&p[3..5]));
		assert_eq!(store.color_of(2), Some(ColorIndex(0)));
		assert_eq!(store.color_of(3), Some(ColorIndex(2)));
		for stroke in store.iter() {
			assert_eq!(stroke.bounds(), AABox::containing(stroke.points().iter().copied()));
		}
	}

	#[test]
	fn pixel_erase_removes_collapsed_strokes() {
		let mut store = StrokeStore::new();
		store.commit(vec![vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)], ColorIndex(0));
		store.commit(straight(), ColorIndex(0));
		let sphere = Sphere::new(vec3(0.5, 0.0, 0.0), 0.2);
		let report = pixel_erase(&mut store, &sphere, SplitPolicy::Truncate, all);
		assert_eq!(report.cut, 2);
		assert_eq!(report.removed, 2);
		assert!(store.is_empty());
	}

	#[test]
	fn pixel_erase_respects_color_filter() {
		let mut store = StrokeStore::new();
		store.commit(straight(), ColorIndex(0));
		store.commit(straight(), ColorIndex(1));
		let only_1 = |c: ColorIndex| c == ColorIndex(1);
		let report = pixel_erase(&mut store, &middle_eraser(), SplitPolicy::Split, only_1);
		assert_eq!(report.cut, 1);
		assert_eq!(store.points_of(0), Some(&straight()[..]));
		assert_eq!(store.len(), 3);
	}
}
