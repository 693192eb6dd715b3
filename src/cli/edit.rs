use anyhow::{Context, Result};
use std::path::PathBuf;

use platerate::fit::FitInterval;
use platerate::interval::{Boundary, IntervalEditor};
use platerate::io::{format_2dp, load_project, save_project};
use platerate::project::WellRecordId;
use platerate::sync::{SelectionSource, UiEvent, ViewSynchronizer, ViewUpdate};

use super::config::Config;
use super::profile::FitProfile;

/// Edits requested on the command line for one well
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub well: String,
    pub plate: usize,
    pub start: Option<usize>,
    pub stop: Option<usize>,
    pub fit: Option<bool>,
    pub manual: Option<bool>,
}

impl EditRequest {
    fn is_empty(&self) -> bool {
        self.start.is_none() && self.stop.is_none() && self.fit.is_none() && self.manual.is_none()
    }

    /// Fit and manual toggles, applied before any boundary edit
    fn toggle_events(&self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        if let Some(enabled) = self.fit {
            events.push(UiEvent::FitToggled(enabled));
        }
        if let Some(manual) = self.manual {
            events.push(UiEvent::ManualToggled(manual));
        }
        events
    }

    /// Boundary clicks that take `current` to the requested bounds.
    ///
    /// With both bounds given the result is exactly `[start, stop]`: the
    /// pair is checked up front and the clicks are ordered so that no
    /// intermediate interval crosses or collapses.
    fn boundary_events(&self, current: FitInterval, len: usize) -> Result<Vec<UiEvent>> {
        let start = |index| UiEvent::BoundaryClicked {
            boundary: Boundary::Start,
            index,
        };
        let stop = |index| UiEvent::BoundaryClicked {
            boundary: Boundary::Stop,
            index,
        };

        Ok(match (self.start, self.stop) {
            (Some(s), Some(e)) => {
                if s >= e || e >= len {
                    anyhow::bail!(
                        "Invalid interval [{}, {}]: need start < stop < {}",
                        s,
                        e,
                        len
                    );
                }
                if s >= current.stop {
                    vec![stop(e), start(s)]
                } else {
                    vec![start(s), stop(e)]
                }
            }
            (Some(s), None) => vec![start(s)],
            (None, Some(e)) => vec![stop(e)],
            (None, None) => Vec::new(),
        })
    }
}

/// Apply one well's edits to a project archive and save it
pub fn run(
    file: PathBuf,
    request: EditRequest,
    profile: FitProfile,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }
    if request.is_empty() {
        anyhow::bail!("Nothing to edit: pass --start, --stop, --fit or --manual");
    }

    let config = Config::load(config_path.as_deref())?;
    let editor = IntervalEditor::new(config.fit_config(profile));
    log::info!("Profile: {}", profile);

    let project = load_project(&file, &editor)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    let plate_index = request
        .plate
        .checked_sub(1)
        .filter(|&i| i < project.plates().len())
        .with_context(|| {
            format!(
                "Plate {} does not exist (project has {})",
                request.plate,
                project.plates().len()
            )
        })?;
    let well_index = project.plates()[plate_index]
        .find(&request.well)
        .with_context(|| format!("Well {} not found on plate {}", request.well, request.plate))?;
    let id = WellRecordId::new(plate_index, well_index);

    let mut sync = ViewSynchronizer::new(project, editor);
    apply(&mut sync, id, &request)?;

    if let Some(panel) = sync.detail_panel() {
        println!("Plate {} well {} ({})", request.plate, panel.well_id, panel.sample_id);
        println!(
            "  Interval: [{}, {}]  t = {} .. {}{}",
            panel.start_index,
            panel.stop_index,
            panel.start_time,
            panel.stop_time,
            if panel.manual_interval { "  (manual)" } else { "" }
        );
        if panel.fit_enabled {
            println!("  Rate: {}", format_2dp(panel.slope));
            println!("  CI95: {}", format_2dp(panel.confidence));
            println!("  R²: {}", format_2dp(panel.r_squared));
        } else {
            println!("  Fit disabled");
        }
    }

    let target = output.unwrap_or(file);
    save_project(sync.project(), &target)
        .with_context(|| format!("Failed to save {}", target.display()))?;
    println!("Saved -> {}", target.display());

    Ok(())
}

/// Select `id` and apply the request; any notice aborts the edit
fn apply(sync: &mut ViewSynchronizer, id: WellRecordId, request: &EditRequest) -> Result<()> {
    let mut events = vec![UiEvent::SelectionChanged(SelectionSource::Record(id))];
    events.extend(request.toggle_events());
    send(sync, events)?;

    // Toggles may re-detect the interval, so bounds are planned afterwards
    let well = sync.project().get(id).context("Selected well disappeared")?;
    let events = request.boundary_events(well.interval(), well.len())?;
    send(sync, events)
}

fn send(sync: &mut ViewSynchronizer, events: Vec<UiEvent>) -> Result<()> {
    for event in events {
        log::debug!("Applying {:?}", event);
        for update in sync.handle(event) {
            if let ViewUpdate::Notice(notice) = update {
                anyhow::bail!("Edit rejected, nothing saved: {}", notice);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use platerate::fit::FitConfig;
    use platerate::plate::{Plate, PlateFormat};
    use platerate::project::Project;
    use platerate::well::WellRecord;

    const A1: WellRecordId = WellRecordId {
        plate_index: 0,
        well_index: 0,
    };

    fn request(start: Option<usize>, stop: Option<usize>) -> EditRequest {
        EditRequest {
            well: "A1".to_string(),
            plate: 1,
            start,
            stop,
            fit: None,
            manual: None,
        }
    }

    /// Linear twelve-point well pinned to `[start, stop]`
    fn synchronizer(start: usize, stop: usize) -> ViewSynchronizer {
        let time: Vec<f64> = (0..12).map(|i| i as f64 * 10.0).collect();
        let signal: Vec<f64> = time.iter().map(|t| 100.0 + 2.0 * t).collect();
        let editor = IntervalEditor::default();
        let mut well = WellRecord::new("A1", "S1", time, signal).unwrap();
        editor.initialize(&mut well).unwrap();
        editor.set_boundary(&mut well, Boundary::Start, start).unwrap();
        editor.set_boundary(&mut well, Boundary::Stop, stop).unwrap();
        assert_eq!(well.interval(), FitInterval::new(start, stop));

        let plate = Plate::new("P1", "p1.csv", PlateFormat::Wells96, vec![well]);
        ViewSynchronizer::new(Project::from_plates(vec![plate]), editor)
    }

    fn interval_after(sync: &mut ViewSynchronizer, request: &EditRequest) -> Result<(usize, usize)> {
        apply(sync, A1, request)?;
        let well = sync.project().get(A1).unwrap();
        Ok((well.interval_start_index(), well.interval_stop_index()))
    }

    #[test]
    fn test_both_bounds_past_current_stop() {
        let mut sync = synchronizer(0, 3);
        let result = interval_after(&mut sync, &request(Some(5), Some(9))).unwrap();
        assert_eq!(result, (5, 9));
    }

    #[test]
    fn test_start_on_current_stop() {
        let mut sync = synchronizer(0, 2);
        let result = interval_after(&mut sync, &request(Some(2), Some(9))).unwrap();
        assert_eq!(result, (2, 9));
    }

    #[test]
    fn test_both_bounds_inside_current() {
        let mut sync = synchronizer(1, 10);
        let result = interval_after(&mut sync, &request(Some(3), Some(6))).unwrap();
        assert_eq!(result, (3, 6));
    }

    #[test]
    fn test_invalid_pair_rejected_unchanged() {
        let mut sync = synchronizer(0, 3);
        for (start, stop) in [(6, 6), (7, 4), (2, 12)] {
            assert!(interval_after(&mut sync, &request(Some(start), Some(stop))).is_err());
            let well = sync.project().get(A1).unwrap();
            assert_eq!(well.interval(), FitInterval::new(0, 3));
        }
    }

    #[test]
    fn test_single_bound_keeps_swap_rule() {
        let mut sync = synchronizer(0, 3);
        let result = interval_after(&mut sync, &request(Some(5), None)).unwrap();
        assert_eq!(result, (3, 5));
    }

    #[test]
    fn test_reenabled_fit_uses_loaded_profile() {
        let time: Vec<f64> = (0..12).map(|i| i as f64 * 10.0).collect();
        let signal: Vec<f64> = time.iter().map(|t| 500.0 * (1.0 - (-t / 40.0).exp())).collect();
        let mut well = WellRecord::new("A1", "S1", time, signal).unwrap();
        let default_editor = IntervalEditor::default();
        default_editor.initialize(&mut well).unwrap();
        default_editor.toggle_fit(&mut well, false).unwrap();

        // A minimum span covering the whole series leaves only the full window
        let editor = IntervalEditor::new(FitConfig {
            min_span: 11,
            ..FitConfig::default()
        });
        let plate = Plate::new("P1", "p1.csv", PlateFormat::Wells96, vec![well]);
        let mut sync = ViewSynchronizer::new(Project::from_plates(vec![plate]), editor);

        let mut request = request(None, None);
        request.fit = Some(true);
        assert_eq!(interval_after(&mut sync, &request).unwrap(), (0, 11));
    }

    #[test]
    fn test_empty_request() {
        assert!(request(None, None).is_empty());
        assert!(!request(Some(1), None).is_empty());
    }
}
