//! Headless host for the fish school.
//!
//! Stands in for the presentation shell: it feeds typed [`HostEvent`]s into a
//! [`School`], steps it with a fixed `dt`, and emits [`FrameReport`]s that a
//! renderer would draw.

use anyhow::{Context, Result};
use fish_core::{Arena, BoundaryPolicy, FishConfig, FishId, School, SchoolConfig};
use fish_shared::{
    Boundary, FishSnapshot, FrameReport, HostEvent, ScheduledEvent, SchoolSettings, StimulusState,
};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::Path;

/// Translate file settings into the core configuration.
pub fn school_config(settings: &SchoolSettings) -> SchoolConfig {
    SchoolConfig {
        arena: Arena::new(settings.width, settings.height),
        boundary: match settings.boundary {
            Boundary::Teleport => BoundaryPolicy::Teleport,
            Boundary::Bounce => BoundaryPolicy::Bounce,
        },
        separation_strength: settings.separation_strength,
        alignment_enabled: settings.alignment_enabled,
        alignment_strength: settings.alignment_strength,
        cohesion_enabled: settings.cohesion_enabled,
        cohesion_strength: settings.cohesion_strength,
        leader_strength: settings.leader_strength,
        centroid_strength: settings.centroid_strength,
        fish: FishConfig {
            max_speed: settings.max_speed,
            visible_radius: settings.visible_radius,
            visible_angle: settings.visible_angle,
            excited_speed: settings.excited_speed,
            scare_distance: settings.scare_distance,
        },
    }
}

pub fn load_settings(path: &Path) -> Result<SchoolSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid settings in {}", path.display()))
}

/// Parse a JSON-lines event script. Blank lines and lines starting with `#`
/// are skipped. Events come back ordered by tick, keeping file order within a
/// tick.
pub fn parse_events<R: BufRead>(reader: R) -> Result<Vec<ScheduledEvent>> {
    let mut events = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read event script")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event: ScheduledEvent = serde_json::from_str(line)
            .with_context(|| format!("Invalid event on line {}", number + 1))?;
        events.push(event);
    }
    events.sort_by_key(|event| event.tick);
    Ok(events)
}

pub fn load_events(path: &Path) -> Result<Vec<ScheduledEvent>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open event script {}", path.display()))?;
    parse_events(std::io::BufReader::new(file))
}

pub struct Host {
    school: School,
    pending: VecDeque<ScheduledEvent>,
    tick: u64,
}

impl Host {
    pub fn new(settings: &SchoolSettings, seed: u64, events: Vec<ScheduledEvent>) -> Result<Self> {
        let school =
            School::try_new(school_config(settings), seed).context("Invalid school settings")?;
        log::info!(
            "School ready: {}x{} arena, seed {}, {} scheduled events",
            settings.width,
            settings.height,
            seed,
            events.len()
        );
        Ok(Self {
            school,
            pending: events.into(),
            tick: 0,
        })
    }

    pub fn school(&self) -> &School {
        &self.school
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Forward one shell event to the matching core call.
    pub fn apply(&mut self, event: HostEvent) -> Option<FishId> {
        match event {
            HostEvent::Spawn { x, y, heading } => {
                let id = self.school.spawn((x, y), heading);
                log::debug!("Spawned fish {} at ({x}, {y})", id.0);
                Some(id)
            }
            HostEvent::StimulusMove { x, y } => {
                self.school.stimulus_mut().set_position(x, y);
                None
            }
            HostEvent::StimulusToggle { active } => {
                self.school.stimulus_mut().set_activated(active);
                log::debug!("Stimulus {}", if active { "activated" } else { "released" });
                None
            }
        }
    }

    /// Apply every event due at the current tick, then advance the school.
    pub fn step(&mut self, dt: f32) {
        while self
            .pending
            .front()
            .is_some_and(|event| event.tick <= self.tick)
        {
            if let Some(scheduled) = self.pending.pop_front() {
                self.apply(scheduled.event);
            }
        }
        self.school.tick(dt);
        self.tick += 1;
    }

    pub fn frame(&self) -> FrameReport {
        let stimulus = self.school.stimulus();
        let position = stimulus.position();
        FrameReport {
            tick: self.tick,
            stimulus: StimulusState {
                x: position.x,
                y: position.y,
                active: stimulus.is_activated(),
            },
            fish: self
                .school
                .fish()
                .iter()
                .enumerate()
                .map(|(id, fish)| {
                    let (x, y) = fish.position();
                    FishSnapshot {
                        id,
                        x,
                        y,
                        heading: fish.heading(),
                    }
                })
                .collect(),
        }
    }

    /// Run `ticks` steps, writing a JSON frame every `every` ticks and after
    /// the last one.
    pub fn run<W: Write>(&mut self, ticks: u64, dt: f32, every: u64, out: &mut W) -> Result<()> {
        let every = every.max(1);
        for _ in 0..ticks {
            self.step(dt);
            if self.tick % every == 0 || self.tick == ticks {
                serde_json::to_writer(&mut *out, &self.frame()).context("Failed to encode frame")?;
                writeln!(out).context("Failed to write frame")?;
            }
        }
        out.flush().context("Failed to flush output")?;
        log::info!(
            "Finished {} ticks with {} fish",
            self.tick,
            self.school.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_school_config_mirrors_settings() {
        let settings = SchoolSettings {
            width: 640.0,
            boundary: Boundary::Bounce,
            cohesion_enabled: true,
            max_speed: 80.0,
            ..SchoolSettings::default()
        };
        let config = school_config(&settings);
        assert_eq!(config.arena, Arena::new(640.0, 800.0));
        assert_eq!(config.boundary, BoundaryPolicy::Bounce);
        assert!(config.cohesion_enabled);
        assert_eq!(config.fish.max_speed, 80.0);
    }

    #[test]
    fn test_default_settings_match_core_defaults() {
        assert_eq!(school_config(&SchoolSettings::default()), SchoolConfig::default());
    }

    #[test]
    fn test_parse_events_skips_comments_and_sorts() {
        let script = "\
# warm-up
{\"tick\":5,\"event\":{\"type\":\"stimulus_toggle\",\"active\":true}}

{\"tick\":0,\"event\":{\"type\":\"spawn\",\"x\":1.0,\"y\":2.0}}
{\"tick\":0,\"event\":{\"type\":\"stimulus_move\",\"x\":3.0,\"y\":4.0}}
";
        let events = parse_events(script.as_bytes()).unwrap();
        let ticks: Vec<u64> = events.iter().map(|e| e.tick).collect();
        assert_eq!(ticks, vec![0, 0, 5]);
        assert!(matches!(events[0].event, HostEvent::Spawn { .. }));
        assert!(matches!(events[1].event, HostEvent::StimulusMove { .. }));
    }

    #[test]
    fn test_parse_events_reports_line_number() {
        let script = "{\"tick\":0,\"event\":{\"type\":\"spawn\",\"x\":1.0,\"y\":2.0}}\nnot json\n";
        let err = parse_events(script.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_host_rejects_invalid_settings() {
        let settings = SchoolSettings {
            width: 0.0,
            ..SchoolSettings::default()
        };
        assert!(Host::new(&settings, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_apply_translates_events() {
        let mut host = Host::new(&SchoolSettings::default(), 1, Vec::new()).unwrap();
        let id = host.apply(HostEvent::Spawn {
            x: 10.0,
            y: 20.0,
            heading: Some(0.0),
        });
        assert_eq!(id, Some(FishId(0)));
        host.apply(HostEvent::StimulusMove { x: 5.0, y: 6.0 });
        host.apply(HostEvent::StimulusToggle { active: true });

        let frame = host.frame();
        assert_eq!(frame.fish.len(), 1);
        assert_eq!((frame.fish[0].x, frame.fish[0].y), (10.0, 20.0));
        assert_eq!(
            frame.stimulus,
            StimulusState {
                x: 5.0,
                y: 6.0,
                active: true
            }
        );
    }

    #[test]
    fn test_events_wait_for_their_tick() {
        let events = vec![ScheduledEvent {
            tick: 2,
            event: HostEvent::Spawn {
                x: 100.0,
                y: 100.0,
                heading: None,
            },
        }];
        let mut host = Host::new(&SchoolSettings::default(), 1, events).unwrap();
        host.step(0.1);
        host.step(0.1);
        assert!(host.school().is_empty());
        host.step(0.1);
        assert_eq!(host.school().len(), 1);
        assert_eq!(host.tick_count(), 3);
    }
}
